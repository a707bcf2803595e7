//! # 엔티티 모듈
//!
//! MongoDB에 영속되는 핵심 도메인 엔티티들을 제공합니다.
//!
//! 이 엔티티들은 프로젝트의 `#[repository]` 매크로와 함께 사용됩니다:
//!
//! ```rust,ignore
//! #[repository(name = "user", collection = "users")]
//! pub struct UserRepository {
//!     db: Arc<Database>,
//!     redis: Arc<RedisClient>,
//! }
//! ```

pub mod users;

pub use users::*;
