//! End-to-end traversal behaviour across every sequence variant.

use std::cmp::Ordering;

use nexus_seq::{ArraySeq, Filter, Kind, Map, Range, Sequence, Zip, strings};

fn drain_i64<S: Sequence<Item = i64>>(seq: &mut S) -> Vec<i64> {
    let mut out = Vec::new();
    while seq.advance() {
        out.push(*seq.current().unwrap());
    }
    out
}

#[test]
fn array_yields_every_element_once() {
    for n in [0usize, 1, 2, 17, 100] {
        let mut data: Vec<usize> = (0..n).map(|i| i * 3).collect();
        let expected = data.clone();
        let mut seq = ArraySeq::new(&mut data);

        let mut advances = 0;
        let mut seen = Vec::new();
        while seq.advance() {
            advances += 1;
            seen.push(*seq.current().unwrap());
        }
        assert_eq!(advances, n);
        assert_eq!(seen, expected);
    }
}

#[test]
fn advance_after_exhaustion_is_idempotent() {
    let mut data = [1, 2];
    let mut array = ArraySeq::new(&mut data).map(|x| x + 1);
    let mut range = Range::new(0, 2, 1).filter(|_| true);

    array.count_remaining();
    range.count_remaining();
    for _ in 0..10 {
        assert!(!array.advance());
        assert!(!range.advance());
        assert!(!array.is_live());
        assert!(!range.is_live());
    }
}

#[test]
fn materialize_matches_reset_traversal() {
    let mut data = [4, 8, 15, 16, 23, 42];
    let mut seq = ArraySeq::new(&mut data).filter(|x| *x > 10).map(|x| x * 2);

    let snapshot = seq.materialize();

    let mut replay = Vec::new();
    if seq.reset() {
        replay.push(*seq.current().unwrap());
        while seq.advance() {
            replay.push(*seq.current().unwrap());
        }
    }
    assert_eq!(snapshot, replay);
    assert_eq!(snapshot, vec![30, 32, 46, 84]);
}

#[test]
fn materialize_does_not_move_cursor() {
    let mut seq = Range::new(0, 10, 1);
    seq.advance_by(4);
    let before = seq.identity();

    assert_eq!(seq.materialize(), vec![4, 5, 6, 7, 8, 9]);
    assert_eq!(seq.identity(), before);
    assert_eq!(seq.current(), Some(&3));
}

#[test]
fn range_examples() {
    assert_eq!(drain_i64(&mut Range::new(0, 10, 2)), vec![0, 2, 4, 6, 8]);
    assert_eq!(drain_i64(&mut Range::new(10, 0, -3)), vec![10, 7, 4, 1]);
}

#[test]
fn filter_even() {
    let mut data = [1i64, 2, 3, 4, 5, 6];
    let mut seq = Filter::new(ArraySeq::new(&mut data), |x: &i64| x % 2 == 0);
    assert_eq!(drain_i64(&mut seq), vec![2, 4, 6]);
}

#[test]
fn map_square() {
    let mut data = [1i64, 2, 3];
    let mut seq = Map::new(ArraySeq::new(&mut data), |x: &i64| x * x);
    assert_eq!(drain_i64(&mut seq), vec![1, 4, 9]);
}

#[test]
fn zip_stops_at_first_exhaustion() {
    let mut a = [1, 2, 3];
    let mut b = [4, 5, 6, 7];
    let mut c = [7, 8, 9];
    let mut zip = Zip::new(vec![
        ArraySeq::new(&mut a),
        ArraySeq::new(&mut b),
        ArraySeq::new(&mut c),
    ]);

    assert_eq!(zip.count_remaining(), 3);
    assert!(!zip.advance());
}

#[test]
fn zip_mixed_variants() {
    let mut data = [100i64, 200, 300, 400];
    let inners: Vec<Box<dyn Sequence<Item = i64> + '_>> = vec![
        Box::new(ArraySeq::new(&mut data)),
        Box::new(Range::new(0, 10, 3)),
        Box::new(Range::new(1, 100, 1).filter(|x| x % 2 == 1).map(|x| -x)),
    ];
    let mut zip = Zip::new(inners);

    let tuples = zip.materialize();
    assert_eq!(
        tuples,
        vec![
            vec![100, 0, -1],
            vec![200, 3, -3],
            vec![300, 6, -5],
            vec![400, 9, -7],
        ]
    );

    assert!(zip.reset());
    assert_eq!(zip.current(), Some(&[100, 0, -1][..]));
    assert_eq!(zip.kind(), Kind::Zip);
}

#[test]
fn nested_zip() {
    let inner = Zip::new(vec![Range::new(0, 3, 1), Range::new(10, 13, 1)])
        .map(|pair: &[i64]| pair[0] + pair[1]);
    let mut outer = Zip::new(vec![
        Box::new(inner) as Box<dyn Sequence<Item = i64>>,
        Box::new(Range::new(0, 100, 50)),
    ]);

    assert_eq!(outer.materialize(), vec![vec![10, 0], vec![12, 50]]);
}

#[test]
fn utilities_drain_from_current_position() {
    let mut names = ["ada", "grace", "barbara", "edsger"];
    let mut seq = strings(&mut names);

    let found = seq.find("barbara", |a, b| (*a).cmp(b)).copied();
    assert_eq!(found, Some("barbara"));

    // Only "edsger" remains.
    let mut rest = Vec::new();
    seq.for_each(|name| rest.push(name.to_string()));
    assert_eq!(rest, vec!["edsger"]);

    assert!(seq.reset());
    assert!(seq.all(|name| !name.is_empty()));

    seq.rewind();
    assert!(seq.any(|name| name.len() == 5));
    assert_eq!(seq.current(), Some(&"grace"));
}

#[test]
fn find_with_custom_comparator() {
    #[derive(Debug, PartialEq)]
    struct Order {
        id: u32,
        qty: u32,
    }

    let mut orders = [
        Order { id: 1, qty: 10 },
        Order { id: 2, qty: 50 },
        Order { id: 3, qty: 20 },
    ];
    let mut seq = ArraySeq::new(&mut orders);

    let hit = seq.find(&3u32, |order, id| order.id.cmp(id));
    assert_eq!(hit, Some(&Order { id: 3, qty: 20 }));

    seq.rewind();
    assert!(seq.find(&9u32, |order, id| order.id.cmp(id)).is_none());
    assert_eq!(
        seq.find(&0u32, |_, _| Ordering::Less),
        None,
        "exhausted sequence finds nothing"
    );
}

#[test]
fn release_cascades_through_owner() {
    use std::rc::Rc;

    let token = Rc::new(());
    let witness = Rc::clone(&token);
    let seq = Range::new(0, 5, 1)
        .map(move |x| {
            let _keep = &token;
            *x
        })
        .filter(|x| *x > 1);

    assert_eq!(Rc::strong_count(&witness), 2);
    seq.release();
    assert_eq!(Rc::strong_count(&witness), 1);
}

#[test]
fn writes_through_array_reach_storage() {
    let mut data = [1, 2, 3, 4];
    {
        let mut seq = ArraySeq::new(&mut data);
        while seq.advance() {
            if let Some(value) = seq.current_mut() {
                *value *= 10;
            }
        }
    }
    assert_eq!(data, [10, 20, 30, 40]);
}
