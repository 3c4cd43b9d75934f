pub mod account;
pub mod member;
pub mod session;
pub mod team;

pub use account::{Account, AccountInfo};
pub use member::{Member, MemberList, UserSummary};
pub use session::{Session, SessionUser};
pub use team::{Team, TeamMember};
