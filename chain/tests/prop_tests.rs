use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use stele_chain::{start_evaluate, Database, EvaluationError, HardforkSchedule};
use stele_ops::{Extensions, FeeSchedule, Operation, TransferOperation};
use stele_types::ids::CORE_ASSET;
use stele_types::{
    AccountId, AccountStatistics, AssetAmount, ChainParameters, Timestamp,
};

fn zero_fee_schedule() -> FeeSchedule {
    let mut schedule = FeeSchedule::default();
    schedule.parameters.transfer.fee = 0;
    schedule.parameters.transfer.price_per_kbyte = 0;
    schedule
}

fn db_with_fee(fee: u64) -> Database {
    let mut schedule = zero_fee_schedule();
    schedule.parameters.transfer.fee = fee;
    let mut db = Database::new(
        ChainParameters::default(),
        schedule,
        HardforkSchedule::all_active(),
    );
    db.set_head_block_time(Timestamp::new(1_000_000));
    db
}

fn transfer(from: AccountId, to: AccountId, amount: i64, fee: i64) -> Operation {
    Operation::Transfer(TransferOperation {
        fee: AssetAmount::core(fee),
        from,
        to,
        amount: AssetAmount::core(amount),
        memo: None,
        extensions: Extensions::default(),
    })
}

proptest! {
    /// Core transfers conserve value: the sum of all balances plus the
    /// accumulated fees never changes.
    #[test]
    fn transfers_conserve_total_value(
        fee in 0i64..5,
        moves in prop::collection::vec((0usize..3, 0usize..3, 1i64..500), 1..30),
    ) {
        let mut db = db_with_fee(fee as u64);
        let accounts = [
            db.create_account("a").unwrap(),
            db.create_account("b").unwrap(),
            db.create_account("c").unwrap(),
        ];
        for account in accounts {
            db.adjust_balance(account, AssetAmount::core(1_000)).unwrap();
        }
        let initial_total = 3_000i64;

        for (from, to, amount) in moves {
            if from == to {
                continue;
            }
            let op = transfer(accounts[from], accounts[to], amount, fee);
            match start_evaluate(&mut db, &op, true) {
                Ok(()) => {}
                Err(EvaluationError::InsufficientBalance { .. }) => {}
                Err(other) => return Err(TestCaseError::fail(format!("{other}"))),
            }
        }

        let balances: i64 = accounts
            .iter()
            .map(|a| db.get_balance(*a, CORE_ASSET).amount)
            .sum();
        let collected = db.store.dynamic_data(CORE_ASSET).unwrap().accumulated_fees;
        prop_assert_eq!(balances + collected, initial_total);
    }

    /// No adjustment sequence can drive a balance negative; rejected debits
    /// leave the balance untouched.
    #[test]
    fn balances_never_go_negative(deltas in prop::collection::vec(-500i64..500, 1..50)) {
        let mut db = db_with_fee(0);
        let account = db.create_account("a").unwrap();
        let mut expected = 0i64;

        for delta in deltas {
            let before = db.get_balance(account, CORE_ASSET).amount;
            match db.adjust_balance(account, AssetAmount::core(delta)) {
                Ok(()) => expected += delta,
                Err(EvaluationError::InsufficientBalance { .. }) => {
                    prop_assert!(before + delta < 0);
                    prop_assert_eq!(db.get_balance(account, CORE_ASSET).amount, before);
                }
                Err(other) => return Err(TestCaseError::fail(format!("{other}"))),
            }
            prop_assert!(db.get_balance(account, CORE_ASSET).amount >= 0);
        }
        prop_assert_eq!(db.get_balance(account, CORE_ASSET).amount, expected);
    }

    /// Holding a balance for dt seconds earns exactly balance x dt
    /// coin-seconds, and spending k fee units consumes exactly k x rate.
    #[test]
    fn coin_seconds_round_trip(
        balance in 1i64..100_000,
        dt in 1u64..1_000_000,
        k in 1u64..50,
        rate in 1u64..10_000,
    ) {
        let t0 = Timestamp::new(1_000);
        let t1 = Timestamp::new(1_000 + dt);
        let mut stats = AccountStatistics::new(AccountId(9));
        stats.set_coin_seconds_earned(0, t0);

        let earned = stats.compute_coin_seconds_earned(balance, t1);
        prop_assert_eq!(earned, balance as u128 * dt as u128);

        stats.update_coin_seconds_earned(balance, t1);
        let consumed = k as u128 * rate as u128;
        prop_assume!(consumed <= earned);
        stats.set_coin_seconds_earned(earned - consumed, t1);
        prop_assert_eq!(stats.coin_seconds_earned, earned - consumed);
    }

    /// Two deposits with the same owner, policy, and period fold into one
    /// record holding the sum; a mismatched period mints a second record.
    #[test]
    fn vesting_fold_vs_mint(
        a1 in 1i64..100_000,
        a2 in 1i64..100_000,
        period in 1u32..10_000_000,
        other_period in 1u32..10_000_000,
    ) {
        prop_assume!(period != other_period);
        let mut db = db_with_fee(0);
        let owner = db.create_account("a").unwrap();

        let v1 = db
            .deposit_lazy_vesting(None, a1, period, owner, true)
            .unwrap()
            .expect("first deposit mints");
        let folded = db.deposit_lazy_vesting(Some(v1), a2, period, owner, true).unwrap();
        prop_assert_eq!(folded, None);
        prop_assert_eq!(db.store.vesting_balance(v1).unwrap().balance.amount, a1 + a2);
        prop_assert_eq!(db.store.vesting_balance_count(), 1);

        let v2 = db
            .deposit_lazy_vesting(Some(v1), a2, other_period, owner, true)
            .unwrap()
            .expect("mismatch mints");
        prop_assert_ne!(v1, v2);
        prop_assert_eq!(db.store.vesting_balance_count(), 2);
    }
}
