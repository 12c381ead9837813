use proptest::prelude::*;

use stele_types::{AccountId, AccountStatistics, AssetAmount, AssetId, Price, Timestamp};

proptest! {
    /// Converting through a rate and back never creates value.
    #[test]
    fn price_round_trip_never_gains(
        base in 1i64..1_000_000,
        quote in 1i64..1_000_000,
        amount in 0i64..1_000_000_000,
    ) {
        let usd = AssetId(1);
        let rate = Price::new(AssetAmount::new(base, usd), AssetAmount::core(quote));
        let there = rate.convert(AssetAmount::new(amount, usd)).unwrap();
        let back = rate.convert(there).unwrap();
        prop_assert!(back.amount <= amount, "round trip gained: {} -> {}", amount, back.amount);
    }

    /// Coin-seconds accrual is monotone in time.
    #[test]
    fn coin_seconds_monotone_in_time(
        balance in 0i64..1_000_000,
        t1 in 1_000u64..1_000_000,
        dt in 0u64..1_000_000,
    ) {
        let mut stats = AccountStatistics::new(AccountId(1));
        stats.set_coin_seconds_earned(0, Timestamp::new(1_000));
        let e1 = stats.compute_coin_seconds_earned(balance, Timestamp::new(t1));
        let e2 = stats.compute_coin_seconds_earned(balance, Timestamp::new(t1 + dt));
        prop_assert!(e2 >= e1);
    }

    /// The fee split routes every unit either to pending or vested, never
    /// both, and the lifetime counter sees the total.
    #[test]
    fn pay_fee_accounts_for_every_unit(
        fees in prop::collection::vec(0i64..1_000_000, 1..20),
        threshold in 0i64..1_000_000,
    ) {
        let mut stats = AccountStatistics::new(AccountId(1));
        let total: i64 = fees.iter().sum();
        for fee in fees {
            stats.pay_fee(fee, threshold);
        }
        prop_assert_eq!(stats.lifetime_fees_paid, total);
        prop_assert_eq!(stats.pending_fees + stats.pending_vested_fees, total);
    }
}
