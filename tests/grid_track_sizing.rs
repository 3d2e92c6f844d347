//! End-to-end grid layout: template parsing types through track sizing to
//! final item geometry, driven through the public formatting-context seam.

use std::sync::Arc;

use fastlayout::layout::contexts::grid::GridFormattingContext;
use fastlayout::layout::{
    formatting_context_for, AvailableSpace, FormattingContext, IntrinsicSizingMode,
    LayoutConstraints,
};
use fastlayout::{
    BoxTree, ComputedStyle, Display, EdgeSizes, GridPosition, IntrinsicSizes, Point, Size,
    TrackBreadth, TrackSizingSpec,
};

fn item(tree: &mut BoxTree, column: i32, row: i32, min: f32, max: f32) -> fastlayout::BoxId {
    let style = ComputedStyle::builder()
        .display(Display::Block)
        .grid_column(GridPosition::LineIndex(column))
        .grid_row(GridPosition::LineIndex(row))
        .build();
    tree.insert_with_intrinsics(
        Arc::new(style),
        IntrinsicSizes::new(Size::new(min, min), Size::new(max, max)),
        vec![],
    )
}

fn grid_container(
    tree: &mut BoxTree,
    columns: Vec<TrackSizingSpec>,
    rows: Vec<TrackSizingSpec>,
    children: Vec<fastlayout::BoxId>,
) -> fastlayout::BoxId {
    let style = ComputedStyle::builder()
        .display(Display::Grid)
        .grid_template_columns(columns)
        .grid_template_rows(rows)
        .build();
    tree.insert(Arc::new(style), children)
}

#[test]
fn auto_column_absorbs_leftover_space() {
    let mut tree = BoxTree::new();
    let a = item(&mut tree, 1, 1, 10.0, 20.0);
    let b = item(&mut tree, 2, 1, 10.0, 20.0);
    let c = item(&mut tree, 3, 1, 10.0, 20.0);
    let root = grid_container(
        &mut tree,
        vec![
            TrackSizingSpec::fixed(100.0),
            TrackSizingSpec::auto(),
            TrackSizingSpec::fixed(50.0),
        ],
        vec![TrackSizingSpec::fixed(40.0)],
        vec![a, b, c],
    );

    let fc = formatting_context_for(Display::Grid).unwrap();
    let size = fc
        .layout(&mut tree, root, &LayoutConstraints::with_definite_size(300.0, 200.0))
        .unwrap();

    assert_eq!(size, Size::new(300.0, 40.0));
    assert_eq!(tree.node(a).content_size().width, 100.0);
    assert_eq!(tree.node(b).content_size().width, 150.0);
    assert_eq!(tree.node(c).content_size().width, 50.0);
    assert_eq!(tree.node(a).position(), Point::new(0.0, 0.0));
    assert_eq!(tree.node(b).position(), Point::new(100.0, 0.0));
    assert_eq!(tree.node(c).position(), Point::new(250.0, 0.0));
}

#[test]
fn percent_tracks_resolve_against_the_content_box() {
    let mut tree = BoxTree::new();
    let a = item(&mut tree, 1, 1, 10.0, 20.0);
    let b = item(&mut tree, 2, 1, 10.0, 20.0);
    let style = ComputedStyle::builder()
        .display(Display::Grid)
        .width(fastlayout::LengthOrAuto::px(200.0))
        .padding(EdgeSizes::uniform(10.0))
        .grid_template_columns(vec![
            TrackSizingSpec::percent(25.0),
            TrackSizingSpec::percent(75.0),
        ])
        .grid_template_rows(vec![TrackSizingSpec::fixed(30.0)])
        .build();
    let root = tree.insert(Arc::new(style), vec![a, b]);

    let fc = GridFormattingContext::new();
    let size = fc
        .layout(&mut tree, root, &LayoutConstraints::with_definite_size(500.0, 300.0))
        .unwrap();

    // The explicit width wins over the available space; percentages
    // resolve against it, and the padding shifts the track origin.
    assert_eq!(size, Size::new(220.0, 50.0));
    assert_eq!(tree.node(a).content_size().width, 50.0);
    assert_eq!(tree.node(b).content_size().width, 150.0);
    assert_eq!(tree.node(a).position(), Point::new(10.0, 10.0));
    assert_eq!(tree.node(b).position(), Point::new(60.0, 10.0));
}

#[test]
fn content_sized_column_tracks_the_largest_item_only() {
    let mut tree = BoxTree::new();
    let a = item(&mut tree, 1, 1, 40.0, 90.0);
    let b = item(&mut tree, 1, 2, 70.0, 90.0);
    let root = grid_container(
        &mut tree,
        vec![TrackSizingSpec::min_content()],
        vec![TrackSizingSpec::fixed(20.0), TrackSizingSpec::fixed(20.0)],
        vec![a, b],
    );

    // Indefinite space: the container shrink-wraps its single column
    let fc = GridFormattingContext::new();
    let constraints =
        LayoutConstraints::new(AvailableSpace::MaxContent, AvailableSpace::MaxContent);
    let size = fc.layout(&mut tree, root, &constraints).unwrap();

    assert_eq!(size.width, 70.0);
    assert_eq!(tree.node(a).content_size().width, 70.0);
    assert_eq!(tree.node(b).content_size().width, 70.0);
}

#[test]
fn minmax_caps_a_track_and_releases_the_rest() {
    let mut tree = BoxTree::new();
    let a = item(&mut tree, 1, 1, 10.0, 20.0);
    let b = item(&mut tree, 2, 1, 10.0, 20.0);
    let root = grid_container(
        &mut tree,
        vec![
            TrackSizingSpec::minmax(TrackBreadth::Fixed(50.0), TrackBreadth::Fixed(100.0)),
            TrackSizingSpec::auto(),
        ],
        vec![TrackSizingSpec::fixed(10.0)],
        vec![a, b],
    );

    let fc = GridFormattingContext::new();
    fc.layout(&mut tree, root, &LayoutConstraints::with_definite_size(400.0, 100.0))
        .unwrap();

    // The first track stops at its 100px limit; the auto track takes what
    // the cap released on top of its own share.
    assert_eq!(tree.node(a).content_size().width, 100.0);
    assert_eq!(tree.node(b).content_size().width, 300.0);
}

#[test]
fn intrinsic_sizes_sum_the_track_bounds() {
    let mut tree = BoxTree::new();
    let a = item(&mut tree, 2, 1, 40.0, 80.0);
    let root = grid_container(
        &mut tree,
        vec![
            TrackSizingSpec::fixed(60.0),
            TrackSizingSpec::minmax(TrackBreadth::MinContent, TrackBreadth::MaxContent),
        ],
        vec![TrackSizingSpec::fixed(20.0)],
        vec![a],
    );

    let fc = GridFormattingContext::new();
    let min = fc
        .intrinsic_inline_size(&tree, root, IntrinsicSizingMode::MinContent)
        .unwrap();
    let max = fc
        .intrinsic_inline_size(&tree, root, IntrinsicSizingMode::MaxContent)
        .unwrap();

    assert_eq!(min, 60.0 + 40.0);
    assert_eq!(max, 60.0 + 80.0);
}

#[test]
fn line_index_resolution_round_trips() {
    use fastlayout::layout::contexts::grid::GridPositionResolver;

    for line in [-3, 0, 1, 2, 7] {
        let index = GridPositionResolver::resolve(GridPosition::LineIndex(line));
        let rewrapped = GridPosition::LineIndex(index as i32 + 1);
        assert_eq!(GridPositionResolver::resolve(rewrapped), index);
    }
}

#[test]
fn relayout_is_stable() {
    let mut tree = BoxTree::new();
    let a = item(&mut tree, 1, 1, 10.0, 20.0);
    let b = item(&mut tree, 2, 2, 30.0, 60.0);
    let root = grid_container(
        &mut tree,
        vec![TrackSizingSpec::fixed(100.0), TrackSizingSpec::auto()],
        vec![TrackSizingSpec::fixed(40.0), TrackSizingSpec::fixed(40.0)],
        vec![a, b],
    );

    let fc = GridFormattingContext::new();
    let constraints = LayoutConstraints::with_definite_size(300.0, 200.0);
    let first = fc.layout(&mut tree, root, &constraints).unwrap();
    let snapshot = fastlayout::debug::inspect(&tree);

    // Every box settled, and running the same pass again changes nothing
    assert!(snapshot.boxes.iter().all(|b| !b.needs_layout));
    let second = fc.layout(&mut tree, root, &constraints).unwrap();
    assert_eq!(first, second);
    assert_eq!(fastlayout::debug::inspect(&tree), snapshot);
}

#[test]
fn snapshot_serializes_final_geometry() {
    let mut tree = BoxTree::new();
    let a = item(&mut tree, 2, 1, 10.0, 20.0);
    let root = grid_container(
        &mut tree,
        vec![TrackSizingSpec::fixed(80.0), TrackSizingSpec::fixed(40.0)],
        vec![TrackSizingSpec::fixed(30.0)],
        vec![a],
    );

    let fc = GridFormattingContext::new();
    fc.layout(&mut tree, root, &LayoutConstraints::with_definite_size(120.0, 100.0))
        .unwrap();

    let json = serde_json::to_value(fastlayout::debug::inspect(&tree)).unwrap();
    let boxes = json["boxes"].as_array().unwrap();
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[a.index()]["display"], "Block");
    assert_eq!(boxes[a.index()]["position"]["x"], 80.0);
    assert_eq!(boxes[a.index()]["content_size"]["width"], 40.0);
    assert_eq!(boxes[root.index()]["children"][0], a.index());
}
