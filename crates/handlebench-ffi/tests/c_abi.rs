//! Drives the C ABI the way a C host would: through the `hb_open` table.

use std::collections::HashSet;

use handlebench_ffi::{
    hb_open, hb_stats_get, hb_userdata_len, hb_userdata_release, HbModule, HbStats, HbStatus,
};
use proptest::prelude::*;

fn open() -> HbModule {
    let mut module = HbModule::default();
    assert_eq!(hb_open(&mut module), HbStatus::Ok as i32);
    module
}

#[test]
fn thousand_userdata_calls_give_thousand_handles() {
    let module = open();
    let userdata = module.userdata.unwrap();

    let mut handles = Vec::with_capacity(1000);
    for _ in 0..1000 {
        let mut h = 0u64;
        assert_eq!(userdata(1024, &mut h), HbStatus::Ok as i32);
        handles.push(h);
    }
    let unique: HashSet<u64> = handles.iter().copied().collect();
    assert_eq!(unique.len(), 1000);

    for h in handles {
        let mut len = 0usize;
        assert_eq!(hb_userdata_len(h, &mut len), HbStatus::Ok as i32);
        assert_eq!(len, 1024);
        assert_eq!(hb_userdata_release(h), HbStatus::Ok as i32);
    }
}

#[test]
fn lightuserdata_is_stable_and_allocation_free() {
    let module = open();
    let light = module.lightuserdata.unwrap();
    let first = light();
    assert!(!first.is_null());

    let mut before = HbStats::default();
    hb_stats_get(&mut before);
    for _ in 0..1000 {
        assert_eq!(light(), first);
    }
    let mut after = HbStats::default();
    hb_stats_get(&mut after);
    assert!(after.static_handles >= before.static_handles + 1000);
}

#[test]
fn zero_sized_userdata_is_a_real_handle() {
    let module = open();
    let userdata = module.userdata.unwrap();
    let (mut a, mut b) = (0u64, 0u64);
    assert_eq!(userdata(0, &mut a), HbStatus::Ok as i32);
    assert_eq!(userdata(0, &mut b), HbStatus::Ok as i32);
    assert_ne!(a, 0);
    assert_ne!(a, b);
    let mut len = usize::MAX;
    assert_eq!(hb_userdata_len(a, &mut len), HbStatus::Ok as i32);
    assert_eq!(len, 0);
    hb_userdata_release(a);
    hb_userdata_release(b);
}

#[test]
fn released_handle_is_never_resolved_again() {
    let userdata = open().userdata.unwrap();
    let mut h = 0u64;
    userdata(64, &mut h);
    assert_eq!(hb_userdata_release(h), HbStatus::Ok as i32);

    // Reallocate enough to reuse the freed entry.
    let mut fresh = Vec::new();
    for _ in 0..8 {
        let mut n = 0u64;
        userdata(64, &mut n);
        fresh.push(n);
    }
    assert!(!fresh.contains(&h));
    let mut len = 0usize;
    assert_eq!(hb_userdata_len(h, &mut len), HbStatus::InvalidHandle as i32);
    for n in fresh {
        hb_userdata_release(n);
    }
}

proptest! {
    #[test]
    fn reported_len_matches_request(size in 0i64..8192) {
        let userdata = open().userdata.unwrap();
        let mut h = 0u64;
        prop_assert_eq!(userdata(size, &mut h), HbStatus::Ok as i32);
        let mut len = 0usize;
        prop_assert_eq!(hb_userdata_len(h, &mut len), HbStatus::Ok as i32);
        prop_assert_eq!(len as i64, size);
        prop_assert_eq!(hb_userdata_release(h), HbStatus::Ok as i32);
    }

    #[test]
    fn negative_sizes_are_out_of_range(size in i64::MIN..0) {
        let userdata = open().userdata.unwrap();
        let mut h = 0u64;
        prop_assert_eq!(userdata(size, &mut h), HbStatus::SizeOutOfRange as i32);
        prop_assert_eq!(h, 0);
    }
}
