//! One-time-initialized global lookup tables.
//!
//! Slider magics, leaper attacks, ray tables and zobrist keys live in a
//! single lazily-built `TABLES` singleton. The tables are immutable
//! after construction and therefore freely shared across threads. Call
//! [`prelude::init_statics`] once at startup to force construction eagerly
//! instead of paying for it on the first position.
//!
//! Access goes through the free functions in [`prelude`].
//!
//! [`prelude::init_statics`]: prelude/fn.init_statics.html
//! [`prelude`]: prelude/index.html

mod boards;
mod magic;
mod zobrist;

pub mod prelude;

use self::boards::BoardTables;
use self::magic::MagicSet;
use self::zobrist::ZobristKeys;

/// Every precomputed table the crate consults.
pub(crate) struct Tables {
    pub(crate) rooks: MagicSet,
    pub(crate) bishops: MagicSet,
    pub(crate) boards: BoardTables,
    pub(crate) zobrist: ZobristKeys,
}

impl Tables {
    fn new() -> Tables {
        let rooks = MagicSet::rooks();
        let bishops = MagicSet::bishops();
        let boards = BoardTables::new(&rooks, &bishops);
        let zobrist = ZobristKeys::new();
        log::debug!("attack and zobrist tables initialized");
        Tables {
            rooks,
            bishops,
            boards,
            zobrist,
        }
    }
}

lazy_static! {
    /// The process-wide table singleton. Built on first access, read-only
    /// afterwards.
    pub(crate) static ref TABLES: Tables = Tables::new();
}
