//! Common utilities for benchmarks

use std::time::Duration;

use conflux_catalog::Catalog;
use conflux_core::{Context, Requirement};
use criterion::Criterion;

/// Criterion settings shared by every bench target
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(10))
        .sample_size(50)
}

/// `pkg0 -> pkg1 -> ... -> pkg{len-1}`, rooted at `pkg0`
pub fn chain_catalog(len: usize) -> Catalog {
    (0..len).fold(Catalog::new().with_root("pkg0"), |catalog, i| {
        let requires: Vec<Requirement> = if i + 1 < len {
            vec![Requirement::new(format!("pkg{}", i + 1), "1.0")]
        } else {
            Vec::new()
        };
        catalog.with_version(format!("pkg{}", i), "1.0", requires)
    })
}

/// Stacked diamonds: `depth` levels of two packages, each requiring both
/// packages of the next level. Every requirement agrees on the version, so
/// every vertex below the root has two unordered constraint origins.
pub fn ladder_catalog(depth: usize) -> Catalog {
    let level = |i: usize| -> Vec<Requirement> {
        if i < depth {
            vec![
                Requirement::new(format!("a{}", i), "1.0"),
                Requirement::new(format!("b{}", i), "1.0"),
            ]
        } else {
            Vec::new()
        }
    };

    let mut catalog = Catalog::new().with_root("app").with_version("app", "1.0", level(0));
    for i in 0..depth {
        catalog = catalog
            .with_version(format!("a{}", i), "1.0", level(i + 1))
            .with_version(format!("b{}", i), "1.0", level(i + 1));
    }
    catalog
}

/// A root requiring `width` libraries, each of which needs its own build of
/// `tool` in the build context
pub fn fan_out_catalog(width: usize) -> Catalog {
    let libraries: Vec<Requirement> =
        (0..width).map(|i| Requirement::new(format!("lib{}", i), "1.0")).collect();

    let mut catalog = Catalog::new()
        .with_root("app")
        .with_version("app", "1.0", libraries)
        .with_version("tool", "1.0", [Requirement::new("runtime", "1.0")])
        .with_version("runtime", "1.0", []);
    for i in 0..width {
        let tool = Requirement::new("tool", "1.0")
            .with_context(Context::Build)
            .with_option("variant", i.to_string());
        catalog = catalog.with_version(format!("lib{}", i), "1.0", [tool]);
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use conflux_resolver::{build, build_with, BuildOptions};

    #[test]
    fn test_generated_catalogs_build() {
        assert_eq!(build("pkg0", &chain_catalog(20)).unwrap().node_count(), 20);
        assert_eq!(build("app", &ladder_catalog(4)).unwrap().node_count(), 9);

        let options = BuildOptions::new().with_parallel_subgraphs(true);
        let graph = build_with("app", &fan_out_catalog(8), &options).unwrap();
        assert_eq!(graph.node_count(), 9);
        assert_eq!(graph.subgraph_count(), 8);
    }
}
