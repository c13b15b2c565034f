use crate::components::{Drawable3D, LineMaterial, Transform};
use crate::entity::EntityId;
use foundation::handles::Handle;

/// Flat component storage indexed by entity.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    transforms: Vec<Option<Transform>>,
    drawables_3d: Vec<Option<Drawable3D>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(Handle::new(self.next_index));
        self.next_index += 1;
        self.ensure_capacity(id.index() as usize);
        id
    }

    pub fn entity_count(&self) -> usize {
        self.next_index as usize
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms
            .get(entity.index() as usize)
            .and_then(|t| *t)
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        self.ensure_capacity(entity.index() as usize);
        self.drawables_3d[entity.index() as usize] = Some(drawable);
    }

    pub fn drawable_3d(&self, entity: EntityId) -> Option<&Drawable3D> {
        self.drawables_3d
            .get(entity.index() as usize)
            .and_then(|d| d.as_ref())
    }

    /// Drawables that also have a transform, in spawn order.
    pub fn drawables_3d(&self) -> Vec<(EntityId, Transform, &Drawable3D)> {
        let mut out = Vec::new();
        for (idx, drawable) in self.drawables_3d.iter().enumerate() {
            let Some(drawable) = drawable else { continue };
            let Some(transform) = self.transforms.get(idx).and_then(|t| *t) else {
                continue;
            };
            out.push((EntityId(Handle::new(idx as u32)), transform, drawable));
        }
        out
    }

    pub fn line_materials_mut(&mut self) -> impl Iterator<Item = &mut LineMaterial> {
        self.drawables_3d
            .iter_mut()
            .filter_map(|d| d.as_mut())
            .filter_map(|d| d.line_material_mut())
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.transforms.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
        }
    }
}
