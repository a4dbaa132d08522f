//! Tests for recipe types.

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_parse_minimal_recipe_uses_defaults() {
    let recipe =
        FilterRecipe::from_json(r#"{ "recipe_version": 1, "filter": { "kind": "vignette" } }"#)
            .unwrap();
    assert_eq!(
        recipe.filter,
        FilterParams::Vignette(VignetteParams {
            strength: 0.5,
            radius: 0.5,
        })
    );
}

#[test]
fn test_parse_recipe_with_all_ascii_fields() {
    let recipe = FilterRecipe::from_json(
        r##"{
            "recipe_version": 1,
            "filter": {
                "kind": "ascii",
                "columns": 40,
                "char_aspect": 0.6,
                "density": "#. ",
                "invert": true
            }
        }"##,
    )
    .unwrap();

    match recipe.filter {
        FilterParams::Ascii(p) => {
            assert_eq!(p.columns, 40);
            assert_eq!(p.density, "#. ");
            assert!(p.invert);
        }
        other => panic!("expected ascii params, got {:?}", other),
    }
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = FilterRecipe::from_json(
        r#"{ "recipe_version": 1, "filter": { "kind": "sepia", "amount": 0.5 } }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("amount"));
}

#[test]
fn test_unknown_kind_is_rejected() {
    assert!(FilterRecipe::from_json(
        r#"{ "recipe_version": 1, "filter": { "kind": "posterize" } }"#
    )
    .is_err());
}

#[test]
fn test_invert_has_no_params() {
    let recipe =
        FilterRecipe::from_json(r#"{ "recipe_version": 1, "filter": { "kind": "invert" } }"#)
            .unwrap();
    assert_eq!(recipe.filter, FilterParams::Invert(InvertParams {}));
}

#[test]
fn test_serialized_recipe_carries_kind_tag() {
    let recipe = FilterRecipe::new(FilterKind::Pixelate.default_params());
    let value = recipe.to_value().unwrap();
    assert_eq!(value["filter"]["kind"], "pixelate");
    assert_eq!(value["filter"]["block_size"], 10);
    assert_eq!(value["recipe_version"], 1);

    let parsed = FilterRecipe::from_json(&recipe.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, recipe);
}

#[test]
fn test_filter_kind_from_str() {
    for kind in FilterKind::ALL {
        assert_eq!(kind.as_str().parse::<FilterKind>().unwrap(), kind);
        assert_eq!(kind.default_params().kind(), kind);
    }
    assert!("sharpen".parse::<FilterKind>().is_err());
}

#[test]
fn test_only_ascii_outputs_text() {
    for kind in FilterKind::ALL {
        let expected = if kind == FilterKind::Ascii {
            OutputKind::Text
        } else {
            OutputKind::Image
        };
        assert_eq!(kind.output_kind(), expected, "{}", kind);
    }
}

#[test]
fn test_overrides_parse_scalars_and_strings() {
    let overrides = vec![
        ("shadow".to_string(), "#000000".to_string()),
        ("highlight".to_string(), "ffffff".to_string()),
    ];
    let params = FilterParams::from_overrides(FilterKind::Duotone, &overrides).unwrap();
    assert_eq!(
        params,
        FilterParams::Duotone(DuotoneParams {
            shadow: "#000000".to_string(),
            highlight: "ffffff".to_string(),
        })
    );

    let overrides = vec![
        ("columns".to_string(), "64".to_string()),
        ("invert".to_string(), "true".to_string()),
        ("density".to_string(), "\"0123\"".to_string()),
    ];
    match FilterParams::from_overrides(FilterKind::Ascii, &overrides).unwrap() {
        FilterParams::Ascii(p) => {
            assert_eq!(p.columns, 64);
            assert!(p.invert);
            assert_eq!(p.density, "0123");
            assert_eq!(p.char_aspect, 0.5);
        }
        other => panic!("expected ascii params, got {:?}", other),
    }
}

#[test]
fn test_overrides_reject_unknown_keys_and_kind() {
    let overrides = vec![("blur".to_string(), "2".to_string())];
    assert!(FilterParams::from_overrides(FilterKind::Sketch, &overrides).is_err());

    let overrides = vec![("kind".to_string(), "invert".to_string())];
    assert!(FilterParams::from_overrides(FilterKind::Sketch, &overrides).is_err());
}

#[test]
fn test_parse_override() {
    assert_eq!(
        parse_override("strength=0.8").unwrap(),
        ("strength".to_string(), "0.8".to_string())
    );
    assert_eq!(
        parse_override("density=a=b").unwrap(),
        ("density".to_string(), "a=b".to_string())
    );
    assert!(parse_override("strength").is_err());
    assert!(parse_override("=1").is_err());
}

#[test]
fn test_with_seed_only_touches_vintage() {
    let vintage = FilterKind::Vintage.default_params().with_seed(99);
    match vintage {
        FilterParams::Vintage(p) => assert_eq!(p.seed, 99),
        other => panic!("expected vintage params, got {:?}", other),
    }

    let sepia = FilterKind::Sepia.default_params();
    assert_eq!(sepia.with_seed(99), sepia);
}
