//! Names of the pre-authored entities in the scene composite

pub const LIGHT_REF: &str = "Light_Ref";
pub const LIGHT_REF_2: &str = "Light_Ref_2";
pub const LIGHT_REF_3: &str = "Light_Ref_3";
pub const LIGHT_REF_4: &str = "Light_Ref_4";
pub const SOHOSCENE_GLB: &str = "sohoscene.glb";
pub const WENMOON: &str = "wenmoon";
pub const SHARK: &str = "shark";
