use proptest::prelude::*;
use psf_domain::catalog::{BenefitId, PackageId};
use psf_sponsorship::{Catalog, Configurator, CostStatus, Phase};
use std::sync::Arc;

static BENEFITS: [&str; 8] = ["logo", "booth", "talk", "swag", "jobs", "party", "blog", "keynote"];
static PACKAGES: [&str; 4] = ["gold", "silver", "stage", ""];

fn catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::from_json(
            r#"{
                "benefits": [
                    { "id": "logo", "cost": 100 },
                    { "id": "booth" },
                    { "id": "talk", "cost": 200, "conflicts": ["logo"] },
                    { "id": "swag", "flags": "PACKAGE_ONLY" },
                    { "id": "jobs", "cost": 150, "flags": "STANDALONE" },
                    { "id": "party", "cost": 90, "flags": "UNAVAILABLE" },
                    { "id": "blog", "cost": 300, "conflicts": ["keynote"] },
                    { "id": "keynote", "conflicts": ["talk"] }
                ],
                "packages": [
                    { "id": "gold", "cost": 5000, "benefits": ["logo", "booth", "swag"] },
                    { "id": "silver", "cost": 2500, "benefits": ["booth"], "allowALaCarte": false },
                    { "id": "stage", "cost": 8000, "benefits": ["keynote", "talk", "booth"] }
                ]
            }"#,
        )
        .unwrap(),
    )
}

#[derive(Debug, Clone)]
enum Action {
    Package(&'static str),
    Toggle(&'static str),
    Clear,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        2 => prop::sample::select(PACKAGES.as_slice()).prop_map(Action::Package),
        5 => prop::sample::select(BENEFITS.as_slice()).prop_map(Action::Toggle),
        1 => Just(Action::Clear),
    ]
}

fn apply(form: &mut Configurator, action: &Action) {
    match action {
        Action::Package(id) => {
            form.select_package(&PackageId::from(*id)).unwrap();
        },
        Action::Toggle(id) => {
            // Ineligible benefits are rejected without side effects.
            let _ = form.toggle_benefit(&BenefitId::from(*id));
        },
        Action::Clear => form.clear_form(),
    }
}

fn assert_consistent(form: &Configurator) {
    let catalog = form.catalog();
    let checked: Vec<_> = form.selected_benefits().collect();

    for (i, a) in checked.iter().enumerate() {
        for b in &checked[i + 1..] {
            assert!(!catalog.conflicting(&a.id, &b.id), "{} and {} are both checked", a.id, b.id);
        }
    }

    let package = form.selected_package();
    for benefit in &checked {
        let bundled = package.is_some_and(|p| p.includes(&benefit.id));
        if benefit.is_package_only() {
            assert!(bundled, "package-only {} checked outside its bundle", benefit.id);
        }
        if package.is_some() && benefit.is_standalone() {
            assert!(bundled, "standalone {} checked next to a package", benefit.id);
        }
        if benefit.is_unavailable() {
            assert!(bundled, "sold out {} checked", benefit.id);
        }
    }

    match form.phase() {
        Phase::NoPackage if checked.is_empty() => assert_eq!(form.cost(), CostStatus::Empty),
        Phase::NoPackage => {
            let priced: Option<u64> = checked.iter().map(|b| b.cost).sum();
            assert_eq!(form.cost(), priced.map_or(CostStatus::Custom, CostStatus::Fixed));
        },
        Phase::Package { clean: true, .. } => {
            let cost = package.map(|p| p.cost).unwrap_or_default();
            assert_eq!(form.cost(), CostStatus::Fixed(cost));
        },
        Phase::Package { clean: false, .. } => assert_eq!(form.cost(), CostStatus::Custom),
    }
}

proptest! {
    #[test]
    fn every_transition_leaves_a_consistent_selection(actions in prop::collection::vec(action(), 0..40)) {
        let mut form = Configurator::with_static_costs(catalog());
        for action in &actions {
            apply(&mut form, action);
            assert_consistent(&form);
        }
    }

    #[test]
    fn selecting_a_package_forgets_earlier_choices(
        actions in prop::collection::vec(action(), 0..20),
        package in prop::sample::select(&PACKAGES[..3]),
    ) {
        let mut fresh = Configurator::with_static_costs(catalog());
        fresh.select_package(&package.into()).unwrap();

        let mut used = Configurator::with_static_costs(catalog());
        for action in &actions {
            apply(&mut used, action);
        }
        used.select_package(&package.into()).unwrap();

        prop_assert_eq!(used.form(), fresh.form());
        prop_assert_eq!(used.cost(), fresh.cost());
        prop_assert_eq!(used.phase(), fresh.phase());
    }

    #[test]
    fn reselecting_the_package_is_idempotent(actions in prop::collection::vec(action(), 0..20)) {
        let mut form = Configurator::with_static_costs(catalog());
        for action in &actions {
            apply(&mut form, action);
        }
        if let Some(id) = form.selected_package().map(|p| p.id.clone()) {
            form.select_package(&id).unwrap();
            let once = (form.form(), form.cost());
            form.select_package(&id).unwrap();
            prop_assert_eq!((form.form(), form.cost()), once);
            let clean = matches!(form.phase(), Phase::Package { clean: true, .. });
            prop_assert!(clean, "reselected package is not clean");
        }
    }

    #[test]
    fn restoring_a_submitted_form_reproduces_it(actions in prop::collection::vec(action(), 0..30)) {
        let mut form = Configurator::with_static_costs(catalog());
        for action in &actions {
            apply(&mut form, action);
        }

        let submitted = form.form();
        let restored = Configurator::restore(catalog(), psf_sponsorship::StaticCosts, &submitted).unwrap();

        prop_assert_eq!(restored.form(), submitted);
        prop_assert_eq!(restored.cost(), form.cost());
    }
}
