use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CanvasError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CanvasError::unsupported("blur")
            .to_string()
            .contains("unsupported operation: blur")
    );
    assert!(CanvasError::render("x").to_string().contains("render error:"));
    assert!(CanvasError::export("x").to_string().contains("export error:"));
    assert!(
        CanvasError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CanvasError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
