#[test]
fn psf_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/psf_error_pass.rs");
    t.pass("tests/ui/psf_error_context_chain.rs");
}
