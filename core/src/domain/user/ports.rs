use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, user::entities::User};

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn get_by_api_token(
        &self,
        token: String,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;
}
