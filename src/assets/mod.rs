pub mod handle;
pub mod io;
pub mod lifecycle;
pub mod loaders;
pub mod manager;
pub mod registry;
pub mod upload;

pub use handle::{ResourceHandle, ResourceTracker, WeakResourceHandle};
pub use io::AssetResolver;
pub use lifecycle::{ResourceEntry, ResourceStage};
pub use loaders::{animation_loader, register_defaults, texture_loader, tilemap_loader};
pub use manager::ResourceManager;
pub use registry::{LoadContext, LoaderRegistry};
pub use upload::{UploadQueue, UploadRequest};
