// Trust network: the curated allow-list of vouched-for accounts.
//
// Membership is a direct lookup. There is no graph walk: an account is either
// on the list or it isn't.

pub mod trusted_set;
