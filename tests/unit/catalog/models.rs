use super::*;

#[test]
fn builtin_catalog_has_eight_portrait_models() {
    let catalog = Catalog::iphone();
    assert_eq!(catalog.len(), 8);
    for model in catalog.iter() {
        let (w, h) = model.resolution;
        assert!(w <= h, "{} is not portrait-canonical", model.name);
        assert!(!model.colors.is_empty());
    }
}

#[test]
fn lookup_by_name() {
    let catalog = Catalog::iphone();
    let pro = catalog.get("iPhone 16 Pro").unwrap();
    assert_eq!(pro.resolution, (1206, 2622));
    assert_eq!(pro.series, Series::Sixteen);
    assert!(pro.has_color("Desert Titanium"));
    assert!(!pro.has_color("Pink"));
    assert!(catalog.get("iPhone 15").is_none());
}

#[test]
fn duplicate_resolutions_are_allowed_across_generations() {
    let catalog = Catalog::iphone();
    let shared: Vec<&str> = catalog
        .iter()
        .filter(|m| m.resolution == (1206, 2622))
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(shared, ["iPhone 16 Pro", "iPhone 17", "iPhone 17 Pro"]);
}

#[test]
fn rejects_landscape_resolution() {
    let err = Catalog::new(vec![DeviceModel::new(
        "Sideways",
        (2000, 1000),
        &["Black"],
        Series::Seventeen,
    )])
    .unwrap_err();
    assert!(matches!(err, MockupError::InvalidCatalog(_)));
}

#[test]
fn rejects_duplicate_names_and_empty_colors() {
    let dup = Catalog::new(vec![
        DeviceModel::new("Twin", (100, 200), &["Black"], Series::Sixteen),
        DeviceModel::new("Twin", (100, 200), &["White"], Series::Seventeen),
    ]);
    assert!(matches!(dup, Err(MockupError::InvalidCatalog(_))));

    let empty = Catalog::new(vec![DeviceModel::new(
        "Colorless",
        (100, 200),
        &[],
        Series::Sixteen,
    )]);
    assert!(matches!(empty, Err(MockupError::InvalidCatalog(_))));
}

#[test]
fn series_serializes_as_generation_string() {
    assert_eq!(serde_json::to_string(&Series::Seventeen).unwrap(), "\"17\"");
    assert_eq!(Series::Seventeen.to_string(), "17");
    assert_eq!(Series::newest(), Series::Seventeen);
}
