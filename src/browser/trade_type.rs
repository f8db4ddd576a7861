/// Options of the trade-type selector. The selector posts `code()`; the
/// value is handed to the backend as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeType {
    All,
    Sale,
    Lease,
    MonthlyRent,
}

impl TradeType {
    pub const ALL: [TradeType; 4] = [
        TradeType::All,
        TradeType::Sale,
        TradeType::Lease,
        TradeType::MonthlyRent,
    ];

    /// Backend trade type code. Empty means every type.
    pub fn code(self) -> &'static str {
        match self {
            TradeType::All => "",
            TradeType::Sale => "A1",
            TradeType::Lease => "B1",
            TradeType::MonthlyRent => "B2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TradeType::All => "전체",
            TradeType::Sale => "매매",
            TradeType::Lease => "전세",
            TradeType::MonthlyRent => "월세",
        }
    }
}
