use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mcsasa::{
    AtomKind, Change, Cuboid, GroupChange, Particle, Point, Sasa, SasaConfig, SearchStrategy, Space,
};

/// Jittered cubic lattice at roughly liquid density, one kind of radius 2.0
#[allow(clippy::cast_precision_loss)]
fn lattice_space(per_axis: usize) -> Space {
    let spacing = 5.0;
    let side = spacing * per_axis as f64;
    let mut particles = Vec::with_capacity(per_axis.pow(3));
    for i in 0..per_axis {
        for j in 0..per_axis {
            for k in 0..per_axis {
                let n = particles.len() as f64 + 1.0;
                let jitter = Point::new((1.3 * n).sin(), (2.7 * n).cos(), (0.7 * n).sin()) * 0.3;
                let cell = Point::new(i as f64 + 0.5, j as f64 + 0.5, k as f64 + 0.5);
                let pos = (cell + jitter) * spacing - Point::repeat(0.5 * side);
                particles.push(Particle::new(0, pos));
            }
        }
    }
    let mut space = Space::new(
        Cuboid::cube(side).expect("valid box"),
        vec![AtomKind::new("A", 2.0)],
    );
    space.add_group(particles).expect("valid group");
    space
}

fn engine(search: SearchStrategy) -> Sasa {
    Sasa::new(SasaConfig {
        search,
        ..Default::default()
    })
    .expect("valid configuration")
}

fn bench_init(c: &mut Criterion) {
    let mut group = c.benchmark_group("init");

    for per_axis in [6, 10, 14] {
        let space = lattice_space(per_axis);
        let n = space.particles().len();
        group.throughput(Throughput::Elements(n as u64));

        for (label, search) in [
            ("direct", SearchStrategy::Direct),
            ("cell_list", SearchStrategy::CellList),
        ] {
            // all-pairs init is quadratic; skip the largest system
            if search == SearchStrategy::Direct && per_axis > 10 {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(label, n), &space, |b, space| {
                b.iter(|| {
                    let mut sasa = engine(search);
                    sasa.init(black_box(space));
                    sasa.total_area(space)
                });
            });
        }
    }

    group.finish();
}

fn bench_single_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_move");

    for (label, search) in [
        ("direct", SearchStrategy::Direct),
        ("cell_list", SearchStrategy::CellList),
    ] {
        let mut space = lattice_space(10);
        let mut sasa = engine(search);
        sasa.init(&space);
        let n = space.particles().len();
        let mut step = 0usize;

        group.bench_function(BenchmarkId::new(label, n), |b| {
            b.iter(|| {
                let index = (step * 37) % n;
                let sign = if step % 2 == 0 { 1.0 } else { -1.0 };
                step += 1;

                let change = Change::displacement(vec![GroupChange::atoms(0, vec![index])]);
                let mut dirty = sasa.affected_indices(&space, &[index]);
                space.translate(index, &Point::new(0.4 * sign, 0.0, 0.0));
                sasa.update(&space, black_box(&change));
                dirty.extend(sasa.affected_indices(&space, &[index]));
                dirty.sort_unstable();
                dirty.dedup();
                sasa.recompute(&space, &dirty);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_init, bench_single_move);
criterion_main!(benches);
