pub mod ad;
pub mod category;
pub mod ebook;
pub mod event;
pub mod foundry;
pub mod lead;
pub mod media_kit;
pub mod news;
pub mod supplier;
pub mod technical_material;

pub use ad::Entity as AdEntity;
pub use category::Entity as CategoryEntity;
pub use ebook::Entity as EbookEntity;
pub use event::Entity as EventEntity;
pub use foundry::Entity as FoundryEntity;
pub use lead::Entity as LeadEntity;
pub use media_kit::Entity as MediaKitEntity;
pub use news::Entity as NewsEntity;
pub use supplier::Entity as SupplierEntity;
pub use technical_material::Entity as TechnicalMaterialEntity;
