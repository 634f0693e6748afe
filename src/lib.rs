#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod assets;
pub mod config;
pub mod errors;
pub mod resources;

pub use assets::{
    AssetResolver, LoadContext, LoaderRegistry, ResourceHandle, ResourceManager, ResourceStage,
    UploadQueue, UploadRequest, WeakResourceHandle,
};
pub use config::{LoadFailurePolicy, OversizePolicy, ResourceConfig};
pub use errors::{ResourceError, Result};
pub use resources::{
    ColorSpace, Image, ResourceInfo, ResourceKind, ResourcePayload, SpriteAnimation, Texture,
    TileMap,
};
