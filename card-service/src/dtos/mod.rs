pub mod applications;

pub use applications::{
    ApplicationResponse, CreateApplicationRequest, CreateApplicationResponse,
    DeleteApplicationResponse,
};
