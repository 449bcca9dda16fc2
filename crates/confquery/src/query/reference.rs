use crate::scene::DepthScene;

use super::QueryError;

/// Names of the reference regions in `scene`, ground plane first, each list
/// in declaration order.
///
/// Sky regions are never consulted. Fails when the scene has no reference
/// region at all.
pub fn parse_reference_objects(scene: &DepthScene) -> Result<Vec<String>, QueryError> {
    let names: Vec<String> = scene
        .ground_plane
        .iter()
        .chain(scene.scene_regions.iter())
        .filter(|r| r.is_reference)
        .map(|r| r.name.clone())
        .collect();
    if names.is_empty() {
        return Err(QueryError::NoReferenceObject);
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{RegionBoundary, SceneRegion};

    fn region(name: &str, is_reference: bool) -> SceneRegion {
        SceneRegion::new(
            name,
            1,
            is_reference,
            RegionBoundary::from_outer(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]),
        )
    }

    #[test]
    fn collects_ground_then_scene_in_order() {
        let mut scene = DepthScene::new(10, 10);
        scene.scene_regions = vec![region("b", true), region("x", false), region("a", true)];
        scene.ground_plane = vec![region("g2", true), region("g1", false)];
        let names = parse_reference_objects(&scene).unwrap();
        assert_eq!(names, vec!["g2", "b", "a"]);
    }

    #[test]
    fn sky_flag_is_ignored() {
        let mut scene = DepthScene::new(10, 10);
        scene.sky = vec![region("sky", true)];
        scene.scene_regions = vec![region("house", false)];
        assert_eq!(
            parse_reference_objects(&scene),
            Err(QueryError::NoReferenceObject)
        );
    }

    #[test]
    fn empty_scene_has_no_reference() {
        assert_eq!(
            parse_reference_objects(&DepthScene::new(10, 10)),
            Err(QueryError::NoReferenceObject)
        );
    }
}
