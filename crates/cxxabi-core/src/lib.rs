//! C++ ABI descriptor for code-generation consumers.
//!
//! A [`TargetCxxAbi`] wraps exactly one [`CxxAbiKind`] and answers the
//! low-level questions that record layout, vtable emission, calling
//! convention lowering, and mangling need to branch on:
//! - **Family:** Itanium lineage or Microsoft
//! - **Member functions:** alignment requirements
//! - **Construction:** constructor variants, primary virtual bases
//! - **Type data emission:** key functions and whether they may be inline
//! - **Record layout:** when base-class tail padding may be reused
//!
//! Every answer is an exhaustive `match` over the closed kind set, so adding
//! a kind fails to compile until every table has been extended.

pub mod abi;
pub mod error;
pub mod kind;
pub mod properties;
pub mod tail_padding;

pub use abi::TargetCxxAbi;
pub use error::{AbiError, Result};
pub use kind::CxxAbiKind;
pub use properties::{AbiProperties, AbiProperty};
pub use tail_padding::{BasePodness, TailPaddingUseRules};
