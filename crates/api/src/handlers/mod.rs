pub mod edit_proposals;
pub mod notifications;
pub mod review;
pub mod submissions;
