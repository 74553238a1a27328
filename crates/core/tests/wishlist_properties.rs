//! Property tests for the wishlist aggregate over random operation sequences.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::str::FromStr;

use proptest::prelude::*;
use rust_decimal::Decimal;

use cricket_sphere_core::{
    AddOutcome, CurrencyCode, Money, ProductId, VariantId, Wishlist, WishlistItem,
};

#[derive(Debug, Clone)]
enum Action {
    Add { variant: u8, title: u8 },
    Remove { variant: u8 },
    Clear,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => (0u8..12, 0u8..4).prop_map(|(variant, title)| Action::Add { variant, title }),
        3 => (0u8..12).prop_map(|variant| Action::Remove { variant }),
        1 => Just(Action::Clear),
    ]
}

fn variant(n: u8) -> VariantId {
    VariantId::parse(&format!("gid://shopify/ProductVariant/{n}")).unwrap()
}

fn item(n: u8, title: u8) -> WishlistItem {
    WishlistItem {
        id: ProductId::parse(&format!("gid://shopify/Product/{}", n / 3)).unwrap(),
        variant_id: variant(n),
        title: format!("Item {n} rev {title}"),
        handle: format!("item-{n}"),
        price: Money::new(
            Decimal::from_str("499.00").unwrap(),
            CurrencyCode::parse("INR").unwrap(),
        ),
        image: None,
        available_for_sale: n % 2 == 0,
    }
}

fn apply(list: &mut Wishlist, action: &Action) {
    match *action {
        Action::Add { variant, title } => {
            list.add(item(variant, title)).unwrap();
        }
        Action::Remove { variant: v } => {
            list.remove(&variant(v));
        }
        Action::Clear => {
            list.clear();
        }
    }
}

fn ids(list: &Wishlist) -> Vec<String> {
    list.variant_ids().map(ToString::to_string).collect()
}

proptest! {
    #[test]
    fn variant_ids_stay_unique(actions in prop::collection::vec(action_strategy(), 0..64)) {
        let mut list = Wishlist::new();
        for action in &actions {
            apply(&mut list, action);
            let unique: HashSet<_> = list.variant_ids().collect();
            prop_assert_eq!(unique.len(), list.len());
            prop_assert_eq!(list.len(), list.items().len());
            prop_assert_eq!(list.iter().count(), list.len());
        }
    }

    #[test]
    fn repeated_add_is_a_no_op(
        actions in prop::collection::vec(action_strategy(), 0..32),
        n in 0u8..12,
        first_title in 0u8..4,
        second_title in 0u8..4,
    ) {
        let mut list = Wishlist::new();
        for action in &actions {
            apply(&mut list, action);
        }
        list.add(item(n, first_title)).unwrap();
        let once = list.clone();

        prop_assert_eq!(list.add(item(n, second_title)).unwrap(), AddOutcome::AlreadyPresent);
        prop_assert_eq!(&list, &once);
    }

    #[test]
    fn remove_keeps_relative_order(
        actions in prop::collection::vec(action_strategy(), 0..48),
        target in 0u8..12,
    ) {
        let mut list = Wishlist::new();
        for action in &actions {
            apply(&mut list, action);
        }
        let target_id = variant(target).to_string();
        let expected: Vec<String> = ids(&list)
            .into_iter()
            .filter(|id| *id != target_id)
            .collect();

        list.remove(&variant(target));
        prop_assert_eq!(ids(&list), expected.clone());

        list.remove(&variant(target));
        prop_assert_eq!(ids(&list), expected);
    }

    #[test]
    fn json_round_trip_is_lossless(actions in prop::collection::vec(action_strategy(), 0..48)) {
        let mut list = Wishlist::new();
        for action in &actions {
            apply(&mut list, action);
        }
        let json = serde_json::to_string(&list).unwrap();
        let decoded: Wishlist = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, list);
    }
}
