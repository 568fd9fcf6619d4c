use crate::model::OperationOutcome;

/// Thông báo chung khi không rút ra được nội dung lỗi từ máy chủ.
pub const GENERIC_SERVER_ERROR: &str = "Server error occurred";

/// Lỗi khi đọc danh sách bệnh nhân.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("Không kết nối được máy chủ: {0}")]
    Transport(String),
    #[error("Máy chủ trả về trạng thái {status}")]
    Status {
        status: u16,
        outcome: Option<OperationOutcome>,
    },
    #[error("Dữ liệu trả về không đúng định dạng: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Thông báo hiển thị cho người dùng.
    ///
    /// Chỉ payload lỗi có cấu trúc mới cho ra nội dung riêng; mọi trường hợp
    /// khác dùng [`GENERIC_SERVER_ERROR`].
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Status {
                outcome: Some(outcome),
                ..
            } => outcome
                .first_message()
                .unwrap_or(GENERIC_SERVER_ERROR)
                .to_string(),
            _ => GENERIC_SERVER_ERROR.to_string(),
        }
    }
}
