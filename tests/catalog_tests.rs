// Host-side tests for the artwork catalog, model registry, content
// dispatch, and the hash route parser.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod catalog {
    include!("../src/catalog.rs");
}

use catalog::*;

#[test]
fn lookup_by_id() {
    let catalog = Catalog::new();
    let art = catalog.get(1).unwrap();
    assert_eq!(art.title, "Starry Night");
    assert_eq!(art.category, "painting");
    assert!(catalog.get(999).is_none());
}

#[test]
fn ids_are_unique() {
    let catalog = Catalog::new();
    for art in catalog.records() {
        assert_eq!(catalog.get(art.id).unwrap().id, art.id);
    }
}

#[test]
fn related_shares_category_and_excludes_self() {
    let catalog = Catalog::new();
    let related = catalog.related(1, 3);
    assert!(!related.is_empty());
    assert!(related.len() <= 3);
    for other in &related {
        assert_ne!(other.id, 1);
        assert_eq!(other.category, "painting");
    }
    assert!(catalog.related(999, 3).is_empty());
}

#[test]
fn paintings_get_the_framed_canvas() {
    let catalog = Catalog::new();
    let models = ModelRegistry::new();
    let art = catalog.get(1).unwrap();
    assert_eq!(
        ContentPlan::resolve(art, &models),
        ContentPlan::Painting {
            image_url: art.image_url
        }
    );
}

#[test]
fn registered_sculptures_load_their_model() {
    let catalog = Catalog::new();
    let models = ModelRegistry::new();
    let art = catalog.get(3).unwrap();
    assert_eq!(art.category, "sculpture");
    assert_eq!(
        ContentPlan::resolve(art, &models),
        ContentPlan::LoadedModel {
            model_url: "/models/the_thinker.glb"
        }
    );
}

#[test]
fn unregistered_sculptures_fall_back_to_the_placeholder() {
    let catalog = Catalog::new();
    let models = ModelRegistry::new();
    // Id 12 is a sculpture with no registered model file.
    let art = catalog.get(12).unwrap();
    assert_eq!(art.category, "sculpture");
    assert!(models.model_url(12).is_none());
    assert_eq!(
        ContentPlan::resolve(art, &models),
        ContentPlan::Placeholder {
            image_url: art.image_url
        }
    );
}

#[test]
fn digital_and_unknown_categories_get_the_placeholder() {
    let catalog = Catalog::new();
    let models = ModelRegistry::new();
    let digital = catalog.get(4).unwrap();
    assert_eq!(digital.category, "digital");
    assert!(matches!(
        ContentPlan::resolve(digital, &models),
        ContentPlan::Placeholder { .. }
    ));

    // A category nobody has heard of must not panic or fall through.
    let future = ArtworkRecord {
        category: "tapestry",
        ..*digital
    };
    assert!(matches!(
        ContentPlan::resolve(&future, &models),
        ContentPlan::Placeholder { .. }
    ));
}

#[test]
fn model_registry_paths() {
    let models = ModelRegistry::new();
    assert_eq!(models.model_url(3), Some("/models/the_thinker.glb"));
    assert_eq!(models.model_url(6), Some("/models/david.glb"));
    assert_eq!(models.model_url(9), Some("/models/venus_de_milo.glb"));
    assert!(models.model_url(1).is_none());
}

#[test]
fn hash_route_parsing() {
    assert_eq!(parse_artwork_hash("#/artwork/7"), Some(7));
    assert_eq!(parse_artwork_hash("#artwork/12"), Some(12));
    assert_eq!(parse_artwork_hash("#/artwork/abc"), None);
    assert_eq!(parse_artwork_hash("#/artwork/"), None);
    assert_eq!(parse_artwork_hash("#/gallery"), None);
    assert_eq!(parse_artwork_hash(""), None);
    assert_eq!(parse_artwork_hash("/artwork/3"), None);
}
