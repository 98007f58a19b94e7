use glam::{Vec3, Vec4};

/// How the material's alpha channel is interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlphaMode {
    Opaque,
    Mask(f32),
    Blend,
}

/// CPU-side summary of a glTF material.
///
/// The renderer owns the GPU-side material; the viewer core only needs
/// enough to identify a material and show it in the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Index in the source document, `None` for the glTF default material.
    pub index: Option<usize>,
    pub name: Option<String>,
    pub base_color: Vec4,
    pub emissive: Vec3,
    pub metalness: f32,
    pub roughness: f32,
    pub alpha_mode: AlphaMode,
    pub double_sided: bool,
}

impl Default for Material {
    /// The glTF default material: opaque white, fully metallic and rough.
    fn default() -> Self {
        Self {
            index: None,
            name: None,
            base_color: Vec4::ONE,
            emissive: Vec3::ZERO,
            metalness: 1.0,
            roughness: 1.0,
            alpha_mode: AlphaMode::Opaque,
            double_sided: false,
        }
    }
}

impl Material {
    /// Display name, falling back to `Material_<index>` or `Default`.
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.name, self.index) {
            (Some(name), _) => name.clone(),
            (None, Some(index)) => format!("Material_{index}"),
            (None, None) => "Default".to_string(),
        }
    }
}

impl From<&gltf::Material<'_>> for Material {
    fn from(material: &gltf::Material<'_>) -> Self {
        let pbr = material.pbr_metallic_roughness();
        let alpha_mode = match material.alpha_mode() {
            gltf::material::AlphaMode::Opaque => AlphaMode::Opaque,
            gltf::material::AlphaMode::Mask => AlphaMode::Mask(material.alpha_cutoff().unwrap_or(0.5)),
            gltf::material::AlphaMode::Blend => AlphaMode::Blend,
        };

        Self {
            index: material.index(),
            name: material.name().map(str::to_string),
            base_color: Vec4::from_array(pbr.base_color_factor()),
            emissive: Vec3::from_array(material.emissive_factor()),
            metalness: pbr.metallic_factor(),
            roughness: pbr.roughness_factor(),
            alpha_mode,
            double_sided: material.double_sided(),
        }
    }
}
