use thiserror::Error;

use crate::api::errors::ApiError;
use crate::forms::FormError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("record not found")]
    NotFound,

    /// The record exists but its state forbids the operation.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid value: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Toast text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Api(err) => api_message(err),
            ServiceError::Form(err) => form_message(err).to_string(),
            ServiceError::NotFound => "Không tìm thấy dữ liệu".to_string(),
            ServiceError::Conflict(message) => message.clone(),
            ServiceError::TypeConstraint(_) => "Dữ liệu không hợp lệ".to_string(),
        }
    }
}

fn api_message(err: &ApiError) -> String {
    match err {
        ApiError::NotFound(_) | ApiError::Server { status: 404, .. } => {
            "Không tìm thấy dữ liệu".to_string()
        }
        ApiError::Server {
            status: 401 | 403, ..
        } => "Bạn không có quyền thực hiện thao tác này".to_string(),
        ApiError::Server { status, message } if *status < 500 && !message.is_empty() => {
            message.clone()
        }
        ApiError::Server { .. } => "Máy chủ đang gặp sự cố, vui lòng thử lại sau".to_string(),
        ApiError::Network(_) => "Không thể kết nối tới máy chủ".to_string(),
        ApiError::Decode(_) => "Dữ liệu trả về không hợp lệ".to_string(),
        ApiError::Rejected(message) if !message.is_empty() => message.clone(),
        ApiError::Rejected(_) => "Yêu cầu bị từ chối".to_string(),
        ApiError::InvalidRequest(_) => "Yêu cầu không hợp lệ".to_string(),
    }
}

fn form_message(err: &FormError) -> &'static str {
    match err {
        FormError::Validation(_) | FormError::TypeConstraint(_) => {
            "Vui lòng kiểm tra lại thông tin đã nhập"
        }
        FormError::MissingField(_) => "Vui lòng điền đầy đủ các trường bắt buộc",
        FormError::NotOnLastStep => "Vui lòng hoàn thành tất cả các bước trước khi gửi",
        FormError::InvalidMedicationIndex(_) => "Không tìm thấy thuốc cần xóa",
    }
}
