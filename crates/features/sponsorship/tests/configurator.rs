use psf_sponsorship::{
    ApplicationForm, Catalog, Configurator, CostStatus, Phase, SponsorshipError, Toggle,
};
use std::sync::Arc;

const CATALOG: &str = r#"{
    "benefits": [
        { "id": "logo", "name": "Logo on site" },
        { "id": "booth", "name": "Expo booth" },
        { "id": "talk", "name": "Sponsor talk", "cost": 200, "conflicts": ["logo"] },
        { "id": "swag", "name": "Swag bag", "flags": "PACKAGE_ONLY" },
        { "id": "jobs", "name": "Job listing", "cost": 150, "flags": "STANDALONE" },
        { "id": "party", "name": "After party", "flags": "UNAVAILABLE" },
        { "id": "blog", "name": "Blog post", "cost": 300 }
    ],
    "packages": [
        { "id": "gold", "name": "Gold", "cost": 5000, "benefits": ["logo", "booth"] },
        { "id": "silver", "name": "Silver", "cost": 2500, "benefits": ["booth", "swag"], "allowALaCarte": false }
    ]
}"#;

fn configurator() -> Configurator {
    Configurator::with_static_costs(Arc::new(Catalog::from_json(CATALOG).unwrap()))
}

fn checked(form: &Configurator) -> Vec<String> {
    form.form().benefits.iter().map(|id| id.to_string()).collect()
}

#[test]
fn gold_then_conflicting_talk() {
    let mut form = configurator();

    let phase = form.select_package(&"gold".into()).unwrap();
    assert_eq!(phase, Phase::Package { id: "gold".into(), clean: true });
    assert_eq!(checked(&form), ["logo", "booth"]);
    assert_eq!(form.cost(), CostStatus::Fixed(5000));
    assert!(form.cost_label().contains("$5,000"));

    let toggle = form.toggle_benefit(&"talk".into()).unwrap();
    assert_eq!(toggle, Toggle::Checked { evicted: vec!["logo".into()] });
    assert_eq!(checked(&form), ["booth", "talk"]);
    assert_eq!(form.cost(), CostStatus::Custom);
    assert_eq!(form.phase(), Phase::Package { id: "gold".into(), clean: false });
}

#[test]
fn toggling_an_extra_back_off_restores_the_package_price() {
    let mut form = configurator();
    form.select_package(&"gold".into()).unwrap();

    form.toggle_benefit(&"blog".into()).unwrap();
    assert_eq!(form.cost(), CostStatus::Custom);
    let diff = form.customization().unwrap();
    assert_eq!(diff.added_by_user, vec!["blog".into()]);
    assert!(diff.removed_by_user.is_empty());

    assert_eq!(form.toggle_benefit(&"blog".into()).unwrap(), Toggle::Unchecked);
    assert_eq!(form.cost(), CostStatus::Fixed(5000));
}

#[test]
fn reselecting_a_package_resets_it() {
    let mut form = configurator();
    form.select_package(&"gold".into()).unwrap();
    let once = form.form();

    form.toggle_benefit(&"booth".into()).unwrap();
    form.select_package(&"gold".into()).unwrap();
    form.select_package(&"gold".into()).unwrap();

    assert_eq!(form.form(), once);
    assert_eq!(form.cost(), CostStatus::Fixed(5000));
}

#[test]
fn closed_package_rejects_add_ons() {
    let mut form = configurator();
    form.select_package(&"silver".into()).unwrap();

    let err = form.toggle_benefit(&"blog".into()).unwrap_err();
    assert!(matches!(
        &err,
        SponsorshipError::BenefitUnavailable { benefit, message, .. }
            if benefit.as_str() == "blog"
                && message == "Cannot add a la carte benefit with the selected package."
    ));
    assert!(!form.is_selected(&"blog".into()));
    assert!(form.disabled_benefits().any(|id| id.as_str() == "blog"));
}

#[test]
fn package_only_benefits_follow_the_package() {
    let mut form = configurator();

    assert!(form.toggle_benefit(&"swag".into()).is_err());

    form.select_package(&"silver".into()).unwrap();
    assert!(form.is_selected(&"swag".into()));

    form.select_package(&"".into()).unwrap();
    assert!(!form.is_selected(&"swag".into()));
    assert_eq!(form.phase(), Phase::NoPackage);
    assert!(form.disabled_benefits().any(|id| id.as_str() == "swag"));
}

#[test]
fn standalone_benefits_need_no_package() {
    let mut form = configurator();
    form.toggle_benefit(&"jobs".into()).unwrap();
    form.toggle_benefit(&"blog".into()).unwrap();
    assert_eq!(form.cost(), CostStatus::Fixed(450));

    form.select_package(&"gold".into()).unwrap();
    assert!(!form.is_selected(&"jobs".into()));
    let err = form.toggle_benefit(&"jobs".into()).unwrap_err();
    assert!(err.to_string().contains("Cannot apply for standalone benefit"));
}

#[test]
fn sold_out_benefits_cannot_be_checked() {
    let mut form = configurator();
    let err = form.toggle_benefit(&"party".into()).unwrap_err();
    assert!(err.to_string().ends_with("This benefit is currently at capacity"));
}

#[test]
fn unknown_ids() {
    let mut form = configurator();
    form.select_package(&"gold".into()).unwrap();
    let before = form.form();

    assert_eq!(form.toggle_benefit(&"nope".into()).unwrap(), Toggle::Ignored);
    let err = form.select_package(&"platinum".into()).unwrap_err();
    assert!(matches!(err, SponsorshipError::UnknownPackage { .. }));
    assert_eq!(form.form(), before);
    assert_eq!(form.cost(), CostStatus::Fixed(5000));
}

#[test]
fn clear_form_resets_everything() {
    let mut form = configurator();
    form.select_package(&"gold".into()).unwrap();
    form.toggle_benefit(&"talk".into()).unwrap();

    form.clear_form();

    assert_eq!(form.phase(), Phase::NoPackage);
    assert!(form.form().benefits.is_empty());
    assert_eq!(form.cost(), CostStatus::Empty);
    assert_eq!(form.cost_label(), "");
}

#[test]
fn restore_replays_a_submitted_form() {
    let catalog = Arc::new(Catalog::from_json(CATALOG).unwrap());
    let submitted = ApplicationForm {
        package: Some("gold".into()),
        benefits: vec!["booth".into(), "blog".into()],
    };

    let form = Configurator::restore(Arc::clone(&catalog), psf_sponsorship::StaticCosts, &submitted)
        .unwrap();
    assert_eq!(checked(&form), ["booth", "blog"]);
    assert_eq!(form.cost(), CostStatus::Custom);

    let unknown = ApplicationForm { package: None, benefits: vec!["ghost".into()] };
    let err = Configurator::restore(catalog, psf_sponsorship::StaticCosts, &unknown).unwrap_err();
    assert!(matches!(err, SponsorshipError::UnknownBenefit { .. }));
}

#[test]
fn restore_rejects_conflicting_benefits() {
    let catalog = Arc::new(Catalog::from_json(CATALOG).unwrap());
    let submitted = ApplicationForm { package: None, benefits: vec!["logo".into(), "talk".into()] };

    let err = Configurator::restore(catalog, psf_sponsorship::StaticCosts, &submitted).unwrap_err();
    assert!(
        matches!(&err, SponsorshipError::BenefitUnavailable { benefit, .. } if benefit.as_str() == "logo"),
        "{err}"
    );
    assert!(err.to_string().contains("conflicts with 'talk'"));
}

#[test]
fn conflicting_bundle_members_keep_the_first() {
    let catalog = Catalog::from_json(
        r#"{
            "benefits": [ { "id": "keynote", "conflicts": ["panel"] }, { "id": "panel" }, { "id": "logo" } ],
            "packages": [ { "id": "stage", "cost": 8000, "benefits": ["keynote", "panel", "logo"] } ]
        }"#,
    )
    .unwrap();
    let mut form = Configurator::with_static_costs(Arc::new(catalog));

    form.select_package(&"stage".into()).unwrap();
    assert_eq!(checked(&form), ["keynote", "logo"]);
    assert_eq!(form.cost(), CostStatus::Fixed(8000));

    // Swapping one side of the bundled conflict for the other keeps the price.
    form.toggle_benefit(&"panel".into()).unwrap();
    assert_eq!(checked(&form), ["panel", "logo"]);
    assert_eq!(form.cost(), CostStatus::Fixed(8000));
}
