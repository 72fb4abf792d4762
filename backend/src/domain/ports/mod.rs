//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::port_error;

mod login_service;
mod publication_store;
mod publications_command;
mod publications_query;
mod vote_ledger;
mod votes_command;

pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use publication_store::MockPublicationStore;
pub use publication_store::{FixturePublicationStore, PublicationStore, PublicationStoreError};
#[cfg(test)]
pub use publications_command::MockPublicationsCommand;
pub use publications_command::{
    CreatePublicationRequest, FixturePublicationsCommand, PublicationPayload, PublicationsCommand,
};
#[cfg(test)]
pub use publications_query::MockPublicationsQuery;
pub use publications_query::{FixturePublicationsQuery, PublicationsQuery, RatedPublicationPayload};
#[cfg(test)]
pub use vote_ledger::MockVoteLedger;
pub use vote_ledger::{FixtureVoteLedger, VoteLedger, VoteLedgerError};
#[cfg(test)]
pub use votes_command::MockVotesCommand;
pub use votes_command::{
    ALREADY_VOTED_MESSAGE, FixtureVotesCommand, PUBLICATION_MISSING_MESSAGE, VOTE_MISSING_MESSAGE,
    VotePayload, VotesCommand,
};

#[cfg(test)]
mod tests;
