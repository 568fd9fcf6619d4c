use crate::error::FetchError;
use crate::model::Patient;

/// Kết quả của lần đọc danh sách duy nhất.
pub type FetchOutcome = Result<Vec<Patient>, FetchError>;

/// Trạng thái hiển thị của danh sách bệnh nhân.
///
/// Chỉ có hai chuyển trạng thái hợp lệ: `Loading -> Loaded` và
/// `Loading -> Failed`. Kết quả đến sau lần hoàn tất đầu tiên bị bỏ qua.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Loading,
    Loaded(Vec<Patient>),
    Failed(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Áp dụng kết quả đọc. Trả về `false` nếu trạng thái đã hoàn tất trước đó.
    pub fn complete(&mut self, outcome: FetchOutcome) -> bool {
        if !self.is_loading() {
            return false;
        }

        *self = match outcome {
            Ok(patients) => ViewState::Loaded(patients),
            Err(err) => ViewState::Failed(err.user_message()),
        };
        true
    }

    /// Trạng thái kế tiếp khi nhận `outcome`, hoặc `None` nếu đã hoàn tất
    /// (dùng cho reducer bất biến của UI).
    pub fn completed(&self, outcome: FetchOutcome) -> Option<ViewState> {
        if !self.is_loading() {
            return None;
        }
        let mut next = ViewState::Loading;
        next.complete(outcome);
        Some(next)
    }

    /// Danh sách đã tải; rỗng khi đang tải hoặc lỗi.
    pub fn patients(&self) -> &[Patient] {
        match self {
            ViewState::Loaded(patients) => patients,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Bệnh nhân đang được mở rộng (tối đa một).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(Option<String>);

impl Selection {
    pub fn selected(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Chọn bệnh nhân theo id. Chọn lại cùng id không đóng panel; id thiếu
    /// hoặc rỗng không làm gì. Trả về `true` nếu lựa chọn thay đổi.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return false;
        };
        if self.selected() == Some(id) {
            return false;
        }
        self.0 = Some(id.to_string());
        true
    }

    /// Bệnh nhân không có id không bao giờ được coi là đang chọn.
    pub fn is_selected(&self, id: Option<&str>) -> bool {
        matches!((self.selected(), id), (Some(current), Some(id)) if current == id)
    }
}

/// Phím kích hoạt một thẻ bệnh nhân (`Enter` hoặc phím cách).
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}
