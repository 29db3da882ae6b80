//! Performance benchmarks for jdu

use std::io;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use jdu::test_utils::TestTree;
use jdu::tree::classify;
use jdu::{Node, NodeVisitor, SortOrder, StreamingFormatter, TreeWalker, WalkerConfig, format_size};
use termcolor::NoColor;

/// Counts visits without rendering anything.
#[derive(Default)]
struct CountingVisitor {
    nodes: usize,
}

impl NodeVisitor for CountingVisitor {
    fn visit_node(&mut self, node: &Node, _depth: usize) -> io::Result<()> {
        black_box(node.size());
        self.nodes += 1;
        Ok(())
    }
}

/// `fanout` directories per level, `depth` levels, `files` files in every directory.
fn create_test_tree(fanout: usize, depth: usize, files: usize) -> TestTree {
    fn fill(tree: &TestTree, prefix: &str, fanout: usize, depth: usize, files: usize) {
        for i in 0..files {
            tree.add_file(&format!("{}file{}", prefix, i), (i + 1) * 64);
        }
        if depth == 0 {
            return;
        }
        for i in 0..fanout {
            let dir = format!("{}dir{}/", prefix, i);
            tree.add_dir(&dir);
            fill(tree, &dir, fanout, depth - 1, files);
        }
    }

    let tree = TestTree::new();
    fill(&tree, "", fanout, depth, files);
    tree
}

fn walk_count(tree: &TestTree, config: WalkerConfig) -> usize {
    let mut walker = TreeWalker::new(config);
    let mut visitor = CountingVisitor::default();
    walker.walk(tree.path(), &mut visitor).unwrap();
    visitor.nodes
}

fn bench_walk(c: &mut Criterion) {
    let small = create_test_tree(3, 3, 5);
    let wide = create_test_tree(20, 2, 10);

    let mut group = c.benchmark_group("walk");
    group.bench_function("small_tree_defaults", |b| {
        b.iter(|| walk_count(&small, WalkerConfig::default()))
    });
    group.bench_function("wide_tree_limit_5", |b| {
        b.iter(|| {
            walk_count(
                &wide,
                WalkerConfig {
                    limit: 5,
                    ..Default::default()
                },
            )
        })
    });
    group.bench_function("wide_tree_depth_1", |b| {
        b.iter(|| {
            walk_count(
                &wide,
                WalkerConfig {
                    max_depth: 1,
                    ..Default::default()
                },
            )
        })
    });
    group.bench_function("wide_tree_by_name", |b| {
        b.iter(|| {
            walk_count(
                &wide,
                WalkerConfig {
                    order: SortOrder::Name,
                    ..Default::default()
                },
            )
        })
    });
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let tree = create_test_tree(4, 3, 8);

    c.bench_function("render_text", |b| {
        b.iter(|| {
            let mut walker = TreeWalker::new(WalkerConfig::default());
            let mut formatter = StreamingFormatter::new(NoColor::new(Vec::new()));
            walker.walk(tree.path(), &mut formatter).unwrap();
            black_box(formatter.into_inner().into_inner().len())
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let tree = TestTree::new();
    let file = tree.add_file("file", 10);
    let dir = tree.add_dir("dir");
    let link = tree.add_symlink("link", "file");
    let dangling = tree.add_symlink("dangling", "missing");

    let mut group = c.benchmark_group("classify");
    group.bench_function("regular_file", |b| b.iter(|| classify(black_box(&file))));
    group.bench_function("directory", |b| b.iter(|| classify(black_box(&dir))));
    group.bench_function("symlink", |b| b.iter(|| classify(black_box(&link))));
    group.bench_function("dangling_symlink", |b| {
        b.iter(|| classify(black_box(&dangling)))
    });
    group.finish();
}

fn bench_format_size(c: &mut Criterion) {
    c.bench_function("format_size", |b| {
        b.iter(|| {
            for bytes in [0u64, 1023, 1024, 2_024_000, 1_021_252_154_021, u64::MAX] {
                black_box(format_size(black_box(bytes)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_walk,
    bench_render,
    bench_classify,
    bench_format_size,
);
criterion_main!(benches);
