//! Externally defined contract interfaces the decoder matches against.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::sol;

sol! {
    /// Emitted by the agenda manager when a new agenda is created.
    #[derive(Debug, PartialEq, Eq)]
    event AgendaCreated(
        address indexed from,
        uint256 indexed id,
        address[] targets,
        uint128 noticePeriodSeconds,
        uint128 votingPeriodSeconds,
        bool atomicExecute
    );

    /// Token wrapper through which agenda creations are submitted.
    #[derive(Debug, PartialEq, Eq)]
    function approveAndCall(address spender, uint256 amount, bytes data) external returns (bool);
}

/// `(targets, notice, voting, atomic, calldatas)`, the inner payload in layout A.
pub type LayoutAPayload = (Vec<Address>, U256, U256, bool, Vec<Bytes>);

/// Layout A with a trailing memo string.
pub type LayoutBPayload = (Vec<Address>, U256, U256, bool, Vec<Bytes>, String);
