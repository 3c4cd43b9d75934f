//! Data queries that back the cards and dialogs.
//!
//! A [`Query`] owns the last loaded value of one request and reloads it on
//! [`Query::refetch`]. It is the refresh source handed to the lifecycle
//! controller after a successful mutation.

pub mod loaders;
pub mod permissions;
pub mod query;

pub use loaders::{AccountInfoLoader, ListAccounts, ListMemberTeams, ListMembers, ListTeams};
pub use permissions::{Permissions, TeamPermissions};
pub use query::{Loader, Query, QueryState};
