//! Stand-ins for host textures, packs and prefabs used by the unit tests.

use std::{cell::Cell, collections::HashMap, rc::Rc};

use crate::{
    colour::{ColourBundle, Rgba},
    host::{Material, Prefab, PrefabCollection},
    names::{Detail, TextureSlot},
    pack::{Pack, PackTexture},
    texture::{SlotTexture, Texture},
};

#[derive(Debug)]
struct TextureState {
    label: String,
    released: Cell<bool>,
}

/// A texture handle that remembers whether it has been released.
#[derive(Clone, Debug)]
pub struct TestTexture(Rc<TextureState>);

impl TestTexture {
    pub fn new(label: impl Into<String>) -> TestTexture {
        TestTexture(Rc::new(TextureState {
            label: label.into(),
            released: Cell::new(false),
        }))
    }

    pub fn label(&self) -> &str {
        &self.0.label
    }

    pub fn is_released(&self) -> bool {
        self.0.released.get()
    }

    /// Returns `true` if both handles refer to the same texture.
    pub fn same_as(&self, other: &TestTexture) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for TestTexture {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Texture for TestTexture {
    fn release(self) {
        assert!(
            !self.0.released.replace(true),
            "texture '{}' released twice",
            self.0.label
        );
    }
}

/// A pack that counts how many times it is asked for a texture.
pub struct CountingPack {
    identity: String,
    names: Vec<String>,

    /// Textures kept in the pack's own storage. When this is `None`, every lookup creates a new
    /// texture owned by the caller.
    shared: Option<HashMap<String, TestTexture>>,

    colours: HashMap<String, ColourBundle>,
    queries: Rc<Cell<usize>>,
}

impl CountingPack {
    fn build(identity: &str, names: &[&str], shared: bool) -> CountingPack {
        let names: Vec<String> = names.iter().map(|name| name.to_string()).collect();

        let shared = shared.then(|| {
            names
                .iter()
                .map(|name| (name.clone(), TestTexture::new(format!("{identity}/{name}"))))
                .collect()
        });

        CountingPack {
            identity: identity.to_string(),
            names,
            shared,
            colours: HashMap::new(),
            queries: Rc::new(Cell::new(0)),
        }
    }

    /// A pack that creates a new texture for every successful lookup.
    pub fn owned(identity: &str, names: &[&str]) -> CountingPack {
        CountingPack::build(identity, names, false)
    }

    /// A pack that hands out textures from its own storage.
    pub fn shared(identity: &str, names: &[&str]) -> CountingPack {
        CountingPack::build(identity, names, true)
    }

    pub fn with_colours(mut self, object: &str, colours: ColourBundle) -> CountingPack {
        self.colours.insert(object.to_string(), colours);
        self
    }

    /// Returns the counter of texture lookups, which stays usable after the pack is moved.
    pub fn queries(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.queries)
    }
}

impl Pack<TestTexture> for CountingPack {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn texture(&self, name: &str) -> Option<PackTexture<TestTexture>> {
        self.queries.set(self.queries.get() + 1);

        if !self.names.iter().any(|n| n == name) {
            return None;
        }

        match &self.shared {
            Some(shared) => shared.get(name).cloned().map(PackTexture::Shared),
            None => Some(PackTexture::Owned(TestTexture::new(format!(
                "{}/{}",
                self.identity, name
            )))),
        }
    }

    fn colours(&self, object: &str) -> Option<ColourBundle> {
        self.colours.get(object).copied()
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct TestMaterial {
    slots: HashMap<TextureSlot, SlotTexture<TestTexture>>,
}

impl TestMaterial {
    /// A material with an original texture in every slot.
    fn with_originals(object: &str) -> TestMaterial {
        let slots = TextureSlot::all()
            .map(|slot| {
                let label = format!("{}/{}", object, slot.property());
                (slot, SlotTexture::original(TestTexture::new(label)))
            })
            .collect();

        TestMaterial { slots }
    }

    pub fn get(&self, slot: TextureSlot) -> Option<&SlotTexture<TestTexture>> {
        self.slots.get(&slot)
    }

    pub fn label(&self, slot: TextureSlot) -> Option<&str> {
        self.get(slot).map(|texture| texture.texture().label())
    }
}

impl Material<TestTexture> for TestMaterial {
    fn texture(&self, slot: TextureSlot) -> Option<SlotTexture<TestTexture>> {
        self.slots.get(&slot).cloned()
    }

    fn set_texture(&mut self, slot: TextureSlot, texture: Option<SlotTexture<TestTexture>>) {
        match texture {
            Some(texture) => self.slots.insert(slot, texture),
            None => self.slots.remove(&slot),
        };
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestPrefab {
    name: String,
    main: Option<TestMaterial>,
    lod: Option<TestMaterial>,
    pub colours: ColourBundle,
}

impl TestPrefab {
    /// A prefab with a full-detail material and no LOD model.
    pub fn new(name: &str) -> TestPrefab {
        TestPrefab {
            name: name.to_string(),
            main: Some(TestMaterial::with_originals(name)),
            lod: None,
            colours: ColourBundle::new(false, [Rgba::rgb(0.5, 0.5, 0.5); 4]),
        }
    }

    pub fn with_lod(mut self) -> TestPrefab {
        self.lod = Some(TestMaterial::with_originals(&format!("{}_lod", self.name)));
        self
    }

    pub fn without_material(mut self) -> TestPrefab {
        self.main = None;
        self
    }

    pub fn with_empty_slot(mut self, slot: TextureSlot) -> TestPrefab {
        if let Some(main) = &mut self.main {
            main.slots.remove(&slot);
        }

        self
    }

    pub fn with_colours(mut self, colours: ColourBundle) -> TestPrefab {
        self.colours = colours;
        self
    }

    pub fn main(&self) -> &TestMaterial {
        self.main.as_ref().expect("prefab has no material")
    }

    pub fn lod(&self) -> &TestMaterial {
        self.lod.as_ref().expect("prefab has no LOD material")
    }
}

impl Prefab<TestTexture> for TestPrefab {
    type Material = TestMaterial;

    fn name(&self) -> &str {
        &self.name
    }

    fn material_mut(&mut self, detail: Detail) -> Option<&mut TestMaterial> {
        match detail {
            Detail::Full => self.main.as_mut(),
            Detail::Lod => self.lod.as_mut(),
        }
    }

    fn colours(&self) -> ColourBundle {
        self.colours
    }

    fn set_colours(&mut self, colours: ColourBundle) {
        self.colours = colours;
    }
}

/// A prefab collection where some indices may be empty.
pub struct TestCollection {
    prefabs: Vec<Option<TestPrefab>>,
}

impl TestCollection {
    pub fn new(prefabs: Vec<TestPrefab>) -> TestCollection {
        TestCollection::with_gaps(prefabs.into_iter().map(Some).collect())
    }

    pub fn with_gaps(prefabs: Vec<Option<TestPrefab>>) -> TestCollection {
        TestCollection { prefabs }
    }

    pub fn get(&self, name: &str) -> &TestPrefab {
        self.prefabs
            .iter()
            .flatten()
            .find(|prefab| prefab.name == name)
            .expect("no prefab with that name")
    }

    pub fn get_mut(&mut self, name: &str) -> &mut TestPrefab {
        self.find_loaded_mut(name).expect("no prefab with that name")
    }
}

impl PrefabCollection<TestTexture> for TestCollection {
    type Prefab = TestPrefab;

    fn loaded_count(&self) -> usize {
        self.prefabs.len()
    }

    fn loaded_mut(&mut self, index: usize) -> Option<&mut TestPrefab> {
        self.prefabs.get_mut(index)?.as_mut()
    }

    fn find_loaded_mut(&mut self, name: &str) -> Option<&mut TestPrefab> {
        self.prefabs
            .iter_mut()
            .flatten()
            .find(|prefab| prefab.name == name)
    }
}
