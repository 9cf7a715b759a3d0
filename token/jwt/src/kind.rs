use serde::{Deserialize, Serialize};

/// Role carried by a token claim. `Admin` authorizes catalog management and
/// request approval/rejection; `User` scopes request listings to the caller.
#[derive(Deserialize, Serialize, PartialEq, Clone, Copy, Debug)]
pub enum JwtTokenKind {
    Admin,
    User,
}
