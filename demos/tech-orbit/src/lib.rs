use wasm_bindgen::prelude::*;

orbit_web::export_scene!("3d-container", "tech-orbit");
