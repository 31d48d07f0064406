//! Data Transfer Objects - request/response types for the API.

mod account;
mod format;
mod generation;

pub use account::{
    AccountResponse, AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse,
    PasswordResetConfirmRequest, PasswordResetRequest, RegisterRequest, RoleStats,
    UpdateRoleRequest, UserListResponse,
};
pub use format::{FormatAnalysisRequest, FormatAnalysisResponse};
pub use generation::{
    AnalysisRequest, AnalysisResponse, AnalysisSuggestionsRequest, CommentRequest,
    CommentResponse, ConversationalCommentRequest, ImproveAnalysisRequest, SuggestionsRequest,
    SuggestionsResponse,
};
