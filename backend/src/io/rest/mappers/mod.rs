pub mod operation_mapper;

pub use operation_mapper::OperationMapper;
