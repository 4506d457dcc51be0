use thiserror::Error;

use super::{GameObject, Rgba, Shape, Vec2};

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("name '{0}' exists")]
    NameTaken(String),
    #[error("object limit reached ({0})")]
    Full(usize),
    #[error("'{0}' not found")]
    NotFound(String),
    #[error("name '{0}' is longer than {max} bytes", max = MAX_NAME_LEN)]
    NameTooLong(String),
}

/// Longest object name, in bytes
pub const MAX_NAME_LEN: usize = 31;

/// The set of objects on the canvas.
///
/// Index order is draw order: index 0 is drawn first, the last object is on top.
pub struct Scene {
    objects: Vec<GameObject>,
    capacity: usize,
}

impl Scene {
    pub fn new(capacity: usize) -> Self {
        Self {
            objects: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    pub fn find(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Place a new object on top of the scene
    pub fn add(
        &mut self,
        name: &str,
        shape: Shape,
        position: Vec2,
        size: f32,
        color: Rgba,
    ) -> Result<&GameObject, SceneError> {
        if name.len() > MAX_NAME_LEN {
            return Err(SceneError::NameTooLong(name.to_string()));
        }
        if self.objects.len() >= self.capacity {
            return Err(SceneError::Full(self.capacity));
        }
        if self.exists(name) {
            return Err(SceneError::NameTaken(name.to_string()));
        }
        self.objects
            .push(GameObject::new(name, shape, position, size, color));
        Ok(&self.objects[self.objects.len() - 1])
    }

    /// Insert an already built object, e.g. one read back from a scene file
    pub fn insert(&mut self, object: GameObject) -> Result<(), SceneError> {
        if object.name.len() > MAX_NAME_LEN {
            return Err(SceneError::NameTooLong(object.name));
        }
        if self.objects.len() >= self.capacity {
            return Err(SceneError::Full(self.capacity));
        }
        if self.exists(&object.name) {
            return Err(SceneError::NameTaken(object.name));
        }
        self.objects.push(object);
        Ok(())
    }

    /// Remove an object, keeping the order of the remaining ones
    pub fn delete(&mut self, name: &str) -> Result<GameObject, SceneError> {
        let idx = self
            .objects
            .iter()
            .position(|o| o.name == name)
            .ok_or_else(|| SceneError::NotFound(name.to_string()))?;
        Ok(self.objects.remove(idx))
    }

    pub fn clear_selection(&mut self) {
        for obj in &mut self.objects {
            obj.selected = false;
        }
    }

    pub fn hit_test(point: Vec2, object: &GameObject) -> bool {
        object.contains(point)
    }

    /// Topmost object under `point`
    pub fn object_at(&self, point: Vec2) -> Option<&GameObject> {
        self.objects.iter().rev().find(|o| Self::hit_test(point, o))
    }

    /// Select the topmost object under `point`.
    ///
    /// Without `additive` the previous selection is dropped first. Clicking
    /// on empty canvas clears the selection. Returns the picked name.
    pub fn select_at(&mut self, point: Vec2, additive: bool) -> Option<String> {
        let hit = self
            .objects
            .iter()
            .rposition(|o| Self::hit_test(point, o));

        if !additive {
            // Keep a multi-selection intact when grabbing one of its members
            let grabbing_selected = hit.map(|i| self.objects[i].selected).unwrap_or(false);
            if !grabbing_selected {
                self.clear_selection();
            }
        }

        let idx = hit?;
        let obj = &mut self.objects[idx];
        obj.selected = true;
        Some(obj.name.clone())
    }

    pub fn selected(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter().filter(|o| o.selected)
    }

    /// Move every selected object by `delta`
    pub fn drag_selected(&mut self, delta: Vec2) {
        for obj in self.objects.iter_mut().filter(|o| o.selected) {
            obj.position += delta;
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with(names: &[&str]) -> Scene {
        let mut scene = Scene::new(8);
        for (i, name) in names.iter().enumerate() {
            scene
                .add(name, Shape::Circle, Vec2::new(i as f32 * 100.0, 0.0), 10.0, Rgba::RED)
                .unwrap();
        }
        scene
    }

    fn names(scene: &Scene) -> Vec<&str> {
        scene.iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn add_rejects_duplicate_name() {
        let mut scene = scene_with(&["box"]);
        let err = scene
            .add("box", Shape::Rect, Vec2::default(), 5.0, Rgba::BLUE)
            .unwrap_err();
        assert_eq!(err, SceneError::NameTaken("box".to_string()));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.find("box").unwrap().shape, Shape::Circle);
    }

    #[test]
    fn add_rejects_when_full() {
        let mut scene = Scene::new(2);
        scene.add("a", Shape::Circle, Vec2::default(), 1.0, Rgba::RED).unwrap();
        scene.add("b", Shape::Circle, Vec2::default(), 1.0, Rgba::RED).unwrap();
        let err = scene
            .add("c", Shape::Circle, Vec2::default(), 1.0, Rgba::RED)
            .unwrap_err();
        assert_eq!(err, SceneError::Full(2));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn add_rejects_overlong_name() {
        let mut scene = Scene::new(4);
        let long = "n".repeat(MAX_NAME_LEN + 1);
        let err = scene
            .add(&long, Shape::Circle, Vec2::default(), 1.0, Rgba::RED)
            .unwrap_err();
        assert_eq!(err, SceneError::NameTooLong(long.clone()));
        assert!(scene.is_empty());

        let object = GameObject::new(long, Shape::Rect, Vec2::default(), 1.0, Rgba::RED);
        assert!(matches!(scene.insert(object), Err(SceneError::NameTooLong(_))));

        let fits = "n".repeat(MAX_NAME_LEN);
        assert!(scene.add(&fits, Shape::Circle, Vec2::default(), 1.0, Rgba::RED).is_ok());
    }

    #[test]
    fn delete_missing_leaves_scene_untouched() {
        let mut scene = scene_with(&["a", "b"]);
        assert_eq!(
            scene.delete("zzz").unwrap_err(),
            SceneError::NotFound("zzz".to_string())
        );
        assert_eq!(names(&scene), vec!["a", "b"]);
    }

    #[test]
    fn delete_preserves_order_of_survivors() {
        let mut scene = scene_with(&["a", "b", "c", "d"]);
        let removed = scene.delete("b").unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(names(&scene), vec!["a", "c", "d"]);
    }

    #[test]
    fn object_at_prefers_topmost() {
        let mut scene = Scene::new(4);
        scene.add("under", Shape::Rect, Vec2::new(0.0, 0.0), 20.0, Rgba::RED).unwrap();
        scene.add("over", Shape::Circle, Vec2::new(5.0, 0.0), 10.0, Rgba::BLUE).unwrap();
        assert_eq!(scene.object_at(Vec2::new(5.0, 0.0)).unwrap().name, "over");
        assert_eq!(scene.object_at(Vec2::new(-18.0, 0.0)).unwrap().name, "under");
        assert!(scene.object_at(Vec2::new(500.0, 0.0)).is_none());
    }

    #[test]
    fn select_at_replaces_selection_unless_additive() {
        let mut scene = scene_with(&["a", "b"]);
        scene.select_at(Vec2::new(0.0, 0.0), false);
        scene.select_at(Vec2::new(100.0, 0.0), false);
        let selected: Vec<_> = scene.selected().map(|o| o.name.as_str()).collect();
        assert_eq!(selected, vec!["b"]);

        scene.select_at(Vec2::new(0.0, 0.0), true);
        assert_eq!(scene.selected().count(), 2);
    }

    #[test]
    fn clicking_empty_space_clears_selection() {
        let mut scene = scene_with(&["a"]);
        scene.select_at(Vec2::new(0.0, 0.0), false);
        assert_eq!(scene.select_at(Vec2::new(900.0, 900.0), false), None);
        assert_eq!(scene.selected().count(), 0);
    }

    #[test]
    fn drag_moves_all_selected_objects() {
        let mut scene = scene_with(&["a", "b", "c"]);
        scene.find_mut("a").unwrap().selected = true;
        scene.find_mut("c").unwrap().selected = true;
        scene.drag_selected(Vec2::new(3.0, -2.0));
        assert_eq!(scene.find("a").unwrap().position, Vec2::new(3.0, -2.0));
        assert_eq!(scene.find("b").unwrap().position, Vec2::new(100.0, 0.0));
        assert_eq!(scene.find("c").unwrap().position, Vec2::new(203.0, -2.0));
    }

    #[test]
    fn grabbing_a_selected_object_keeps_group() {
        let mut scene = scene_with(&["a", "b"]);
        scene.find_mut("a").unwrap().selected = true;
        scene.find_mut("b").unwrap().selected = true;
        scene.select_at(Vec2::new(0.0, 0.0), false);
        assert_eq!(scene.selected().count(), 2);
    }
}
