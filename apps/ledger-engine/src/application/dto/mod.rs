//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod ledger_dto;

pub use ledger_dto::{
    AccountDto, AccountProfileDto, AdjustBalanceRequestDto, AdjustBalanceResponseDto,
    BalanceAdjustment, MAX_BANK_SOURCE_CHARS, MAX_NOTE_CHARS, OpenAccountRequestDto, PositionDto,
    QuoteDto, SettleOrderRequestDto, SettlementResponseDto,
};
