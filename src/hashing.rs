//! Hashing - SHA-256 digests over canonical JSON
//!
//! Scene digests let a caller confirm that a retrieved copy still matches
//! what was captured. The digest covers exact coordinates, so two scenes
//! that compare equal within tolerance can still digest differently.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::scene::Scene;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Canonical text form: object keys sorted at every depth, no whitespace.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(value)?;
    sort_keys(&mut value);
    serde_json::to_string(&value)
}

fn sort_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = std::mem::take(map)
                .into_iter()
                .map(|(key, mut child)| {
                    sort_keys(&mut child);
                    (key, child)
                })
                .collect();
            map.extend(sorted);
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}

/// Digest of a scene's exact contents, in drawing order.
pub fn scene_digest(scene: &Scene) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(scene)?;
    let digest = Sha256::digest(canonical.as_bytes());
    Ok(digest
        .iter()
        .flat_map(|b| [HEX[usize::from(b >> 4)], HEX[usize::from(b & 0x0f)]])
        .map(char::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Extent, Point, Rgb, Shape, ShapeKind};

    fn ellipse(name: &str, x: f64) -> Shape {
        Shape::new(
            name,
            ShapeKind::Ellipse,
            Extent::new(2.0, 2.0),
            Point::new(x, 1.0),
            Rgb::new(1.0, 0.0, 0.0),
        )
        .unwrap()
    }

    fn scene_with(names: &[&str]) -> Scene {
        let mut scene = Scene::new();
        for name in names {
            scene.add_shape(ellipse(name, 1.0)).unwrap();
        }
        scene
    }

    #[test]
    fn test_shape_fields_are_canonically_ordered() {
        let canonical = canonical_json(&scene_with(&["x"])).unwrap();
        assert!(canonical.starts_with(r#"{"shapes":[{"color":{"b":0.0,"g":0.0,"r":1.0},"extent":"#));
        assert!(!canonical.contains(char::is_whitespace));

        let keys = ["\"color\"", "\"extent\"", "\"kind\"", "\"name\"", "\"position\""];
        let offsets: Vec<usize> = keys.iter().map(|k| canonical.find(k).unwrap()).collect();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_scene_digest_stable() {
        let a = scene_with(&["x", "y"]);
        let digest = scene_digest(&a).unwrap();
        assert_eq!(digest, scene_digest(&a.clone()).unwrap());
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_scene_digest_order_sensitive() {
        let xy = scene_with(&["x", "y"]);
        let yx = scene_with(&["y", "x"]);
        assert_ne!(scene_digest(&xy).unwrap(), scene_digest(&yx).unwrap());
    }

    #[test]
    fn test_scene_digest_is_exact_under_tolerance() {
        let mut near = Scene::new();
        near.add_shape(ellipse("x", 1.005)).unwrap();
        let base = scene_with(&["x"]);

        assert_eq!(near, base);
        assert_ne!(scene_digest(&near).unwrap(), scene_digest(&base).unwrap());
    }
}
