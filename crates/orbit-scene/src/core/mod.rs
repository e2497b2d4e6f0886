pub mod frame_loop;
pub mod rng;
pub mod scene;
