// Path: crates/api/src/state/tests.rs
use super::*;

fn keys(state: &dyn StateAccess, prefix: &[u8]) -> Vec<Vec<u8>> {
    state
        .prefix_scan(prefix)
        .unwrap()
        .map(|r| r.unwrap().0.to_vec())
        .collect()
}

#[test]
fn test_prefix_successor() {
    assert_eq!(overlay::prefix_successor(b"ab"), Some(b"ac".to_vec()));
    assert_eq!(overlay::prefix_successor(&[0x01, 0xFF]), Some(vec![0x02]));
    assert_eq!(overlay::prefix_successor(&[0xFF, 0xFF]), None);
    assert_eq!(overlay::prefix_successor(b""), None);
}

#[test]
fn test_overlay_reads_through_and_shadows_base() {
    let mut base = MemoryState::new();
    base.insert(b"k::a", b"1").unwrap();
    base.insert(b"k::b", b"2").unwrap();

    let mut overlay = StateOverlay::new(&base);
    overlay.insert(b"k::b", b"20").unwrap();
    overlay.delete(b"k::a").unwrap();
    overlay.insert(b"k::c", b"3").unwrap();

    assert_eq!(overlay.get(b"k::a").unwrap(), None);
    assert_eq!(overlay.get(b"k::b").unwrap(), Some(b"20".to_vec()));
    assert_eq!(keys(&overlay, b"k::"), vec![b"k::b".to_vec(), b"k::c".to_vec()]);

    // Nothing reached the base.
    assert_eq!(base.get(b"k::a").unwrap(), Some(b"1".to_vec()));
    assert_eq!(base.get(b"k::c").unwrap(), None);
}

#[test]
fn test_ordered_batch_commits_into_base() {
    let mut base = MemoryState::new();
    base.insert(b"x", b"old").unwrap();

    let batch = {
        let mut overlay = StateOverlay::new(&base);
        assert!(overlay.is_clean());
        overlay.insert(b"y", b"new").unwrap();
        overlay.delete(b"x").unwrap();
        overlay.into_ordered_batch()
    };
    assert_eq!(batch.len(), 2);
    base.apply_batch(&batch).unwrap();

    assert_eq!(base.get(b"x").unwrap(), None);
    assert_eq!(base.get(b"y").unwrap(), Some(b"new".to_vec()));
    assert_eq!(base.len(), 1);
}

#[test]
fn test_scan_respects_prefix_bounds() {
    let mut base = MemoryState::new();
    for key in [&b"a::1"[..], b"a::2", b"a:", b"b::1"] {
        base.insert(key, b"v").unwrap();
    }
    assert_eq!(keys(&base, b"a::"), vec![b"a::1".to_vec(), b"a::2".to_vec()]);
}

#[test]
fn test_typed_helpers() {
    let mut base = MemoryState::new();
    put_encoded(&mut base, b"n::1", &7u64).unwrap();
    put_encoded(&mut base, b"n::2", &9u64).unwrap();
    assert_eq!(get_decoded::<u64>(&base, b"n::1").unwrap(), Some(7));
    assert_eq!(get_decoded::<u64>(&base, b"n::3").unwrap(), None);
    assert_eq!(scan_decoded::<u64>(&base, b"n::", 1).unwrap(), vec![7]);

    base.insert(b"n::bad", &[1]).unwrap();
    assert!(matches!(
        get_decoded::<u64>(&base, b"n::bad"),
        Err(StateError::Decode(_))
    ));
}
