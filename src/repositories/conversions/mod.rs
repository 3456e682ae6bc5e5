pub mod conversion_repo;

pub use conversion_repo::ConversionRepository;
