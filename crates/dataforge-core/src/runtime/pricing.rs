// crates/dataforge-core/src/runtime/pricing.rs
// ============================================================================
// Module: Pricing Provisioner
// Description: Creates the datatoken and binds exactly one exchange mechanism.
// Purpose: Assemble creation parameters with config-injected fees and invoke the factory once.
// Dependencies: bigdecimal, tracing, crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Every publish creates one datatoken bound to one collection token and
//! exactly one of two exchange mechanisms: a fixed-rate exchange or a free
//! dispenser with hard anti-abuse caps. Fees and contract addresses are
//! injected from configuration so publisher input cannot tamper with them.
//! The factory call is all-or-nothing; a failure leaves no receipt.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::core::ddo::NftCreateData;
use crate::core::form::DatatokenDraft;
use crate::core::form::FormSnapshot;
use crate::core::form::PricingSelection;
use crate::core::identifiers::Address;
use crate::core::market::ChainContracts;
use crate::core::market::DATATOKEN_DECIMALS;
use crate::core::market::MAX_SUPPLY_CAP;
use crate::core::market::MarketFees;
use crate::core::market::ONE_TOKEN_BASE_UNITS;
use crate::core::market::PricingReceipt;
use crate::interfaces::CancelToken;
use crate::interfaces::DatatokenCreateParams;
use crate::interfaces::DispenserParams;
use crate::interfaces::FixedRateParams;
use crate::interfaces::NftFactory;
use crate::interfaces::ProvisioningError;
use crate::interfaces::ValidationError;

// ============================================================================
// SECTION: Provisioner
// ============================================================================

/// Decides and invokes the token-creation and exchange-binding sequence.
pub struct PricingProvisioner<'a> {
    /// Marketplace fee configuration.
    fees: &'a MarketFees,
    /// Exchange mechanism contracts for the target chain.
    contracts: &'a ChainContracts,
}

impl<'a> PricingProvisioner<'a> {
    /// Creates a provisioner over the given fees and chain contracts.
    #[must_use]
    pub const fn new(fees: &'a MarketFees, contracts: &'a ChainContracts) -> Self {
        Self {
            fees,
            contracts,
        }
    }

    /// Creates the collection token, datatoken, and selected exchange
    /// mechanism, returning the addresses the final document needs.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::Validation`] for malformed pricing input,
    /// [`ProvisioningError::Cancelled`] when the token is cancelled before
    /// the factory call, and [`ProvisioningError::Failed`] when the factory
    /// call fails. No partial token state survives any error.
    pub fn provision(
        &self,
        form: &FormSnapshot,
        factory: &dyn NftFactory,
        cancel: &CancelToken,
    ) -> Result<PricingReceipt, ProvisioningError> {
        if cancel.is_cancelled() {
            return Err(ProvisioningError::Cancelled);
        }
        let service = form.first_service()?;
        let owner = &form.user.account_id;
        let nft = NftCreateData::from_template(&form.metadata.collection, owner);
        match &form.pricing {
            PricingSelection::Fixed {
                base_token,
                price,
            } => {
                validate_price(price)?;
                let datatoken = self.datatoken_params(
                    owner,
                    base_token.address.clone(),
                    self.fees.order_fee.clone(),
                    &service.datatoken,
                );
                let fixed_rate = FixedRateParams {
                    fixed_rate_address: self.contracts.fixed_rate_exchange.clone(),
                    base_token_address: base_token.address.clone(),
                    owner: owner.clone(),
                    market_fee_collector: self.fees.fee_address.clone(),
                    base_token_decimals: base_token.decimals,
                    datatoken_decimals: DATATOKEN_DECIMALS,
                    fixed_rate: price.trim().to_string(),
                    market_fee: self.fees.fixed_swap_fee.clone(),
                    with_mint: true,
                };
                tracing::info!(
                    owner = %owner,
                    rate = %fixed_rate.fixed_rate,
                    base_token = %base_token.address,
                    "creating datatoken with fixed-rate exchange"
                );
                Ok(factory.create_with_fixed_rate(owner, &nft, &datatoken, &fixed_rate, cancel)?)
            }
            PricingSelection::Free => {
                let datatoken = self.datatoken_params(
                    owner,
                    Address::zero(),
                    "0".to_string(),
                    &service.datatoken,
                );
                let dispenser = DispenserParams {
                    dispenser_address: self.contracts.dispenser.clone(),
                    max_tokens: ONE_TOKEN_BASE_UNITS.to_string(),
                    max_balance: ONE_TOKEN_BASE_UNITS.to_string(),
                    with_mint: true,
                    allowed_swapper: Address::zero(),
                };
                tracing::info!(owner = %owner, "creating datatoken with dispenser");
                Ok(factory.create_with_dispenser(owner, &nft, &datatoken, &dispenser, cancel)?)
            }
        }
    }

    /// Assembles datatoken creation parameters with config-injected fees.
    fn datatoken_params(
        &self,
        owner: &Address,
        fee_token: Address,
        fee_amount: String,
        draft: &DatatokenDraft,
    ) -> DatatokenCreateParams {
        DatatokenCreateParams {
            template_index: self.fees.datatoken_template_index,
            minter: owner.clone(),
            payment_collector: owner.clone(),
            market_fee_address: self.fees.fee_address.clone(),
            fee_token,
            fee_amount,
            cap: MAX_SUPPLY_CAP.to_string(),
            name: draft.name.clone(),
            symbol: draft.symbol.clone(),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates that a publisher-entered price is a positive decimal.
fn validate_price(price: &str) -> Result<(), ValidationError> {
    let parsed = BigDecimal::from_str(price.trim())
        .map_err(|_| ValidationError::InvalidPrice(price.to_string()))?;
    if parsed <= BigDecimal::from(0) {
        return Err(ValidationError::InvalidPrice(price.to_string()));
    }
    Ok(())
}
