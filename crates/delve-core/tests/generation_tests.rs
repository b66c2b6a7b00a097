use std::collections::VecDeque;

use delve_core::{
    AreaTree, GameRng, GeneratedLevel, GeneratorConfig, LayerKind, Map, Tile, generate,
    generate_for_depth,
};

const SEEDS: [u64; 8] = [0, 1, 2, 3, 42, 1234, 98765, u64::MAX];

fn scenario() -> GeneratorConfig {
    GeneratorConfig {
        width: 150,
        height: 40,
        splits: 3,
        min_room_size: 15,
        corridor_width: 3,
        ..GeneratorConfig::default()
    }
}

/// Cells reachable from `start` over passable tiles
fn walkable_from(map: &Map, start: (i32, i32)) -> Vec<bool> {
    let index = |x: i32, y: i32| (y * map.width() + x) as usize;
    let mut seen = vec![false; (map.width() * map.height()) as usize];
    let mut queue = VecDeque::from([start]);
    seen[index(start.0, start.1)] = true;
    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
            let (nx, ny) = (x + dx, y + dy);
            if map.is_passable(nx, ny) && !seen[index(nx, ny)] {
                seen[index(nx, ny)] = true;
                queue.push_back((nx, ny));
            }
        }
    }
    seen
}

#[test]
fn test_same_seed_same_level() {
    for seed in SEEDS {
        let a = generate(&scenario(), &mut GameRng::new(seed));
        let b = generate(&scenario(), &mut GameRng::new(seed));
        assert_eq!(
            a.map.layer(LayerKind::Ground),
            b.map.layer(LayerKind::Ground)
        );
        assert_eq!(
            a.map.layer(LayerKind::Structures),
            b.map.layer(LayerKind::Structures)
        );
        assert_eq!(a, b);
    }
}

#[test]
fn test_seed_phrase_levels_match() {
    let a = generate(&scenario(), &mut GameRng::from_seed_str("deep halls"));
    let b = generate(&scenario(), &mut GameRng::from_seed_str("deep halls"));
    assert_eq!(a.map, b.map);
}

#[test]
fn test_scenario_one_stair_each_way() {
    for seed in SEEDS {
        let level = generate(&scenario(), &mut GameRng::new(seed));
        let ups = level.map.find_tiles(LayerKind::Structures, Tile::StairsUp);
        let downs = level.map.find_tiles(LayerKind::Structures, Tile::StairsDown);
        assert_eq!(ups.len(), 1, "seed {seed}");
        assert_eq!(downs.len(), 1, "seed {seed}");
        assert_ne!(ups[0], downs[0]);

        let up = level.stairs_up.unwrap();
        let down = level.stairs_down.unwrap();
        assert_eq!((up.x, up.y), ups[0]);
        assert_eq!((down.x, down.y), downs[0]);
        assert_ne!(up.room, down.room);
        assert!(level.areas[up.room].is_leaf());
        assert!(level.areas[down.room].is_leaf());
        assert!(!level.areas[up.room].is_street());
    }
}

#[test]
fn test_scenario_down_stair_reachable() {
    for seed in SEEDS {
        let level = generate(&scenario(), &mut GameRng::new(seed));
        let up = level.up().unwrap();
        let down = level.down().unwrap();
        assert!(level.map.is_passable(up.0, up.1));
        let seen = walkable_from(&level.map, up);
        let i = (down.1 * level.map.width() + down.0) as usize;
        assert!(seen[i], "seed {seed}: down stair cut off");
    }
}

#[test]
fn test_connected_rooms_reach_up_stair_room() {
    for seed in SEEDS {
        let level = generate(&scenario(), &mut GameRng::new(seed));
        let start = level.stairs_up.unwrap().room;
        let reach = level.adjacency.reachable_from(start);
        for (id, area) in level.areas.rooms() {
            if area.is_connected() {
                assert!(reach[id.0], "seed {seed}: room {} unreachable", id.0);
            }
        }
    }
}

#[test]
fn test_leaf_degree_counts_doors() {
    for seed in SEEDS {
        let level = generate(&scenario(), &mut GameRng::new(seed));
        for (id, _) in level.areas.rooms() {
            let doors = level.doors.iter().filter(|d| d.room == id).count();
            assert_eq!(level.adjacency.degree(id), doors);
        }
    }
}

#[test]
fn test_streets_clear_of_walls_except_caps() {
    let level = generate(&scenario(), &mut GameRng::new(6));
    let structures = level.map.layer(LayerKind::Structures);
    for (_, street) in level.areas.streets() {
        let (lx, ly) = street.along();
        // Everything strictly between the two end rows is open
        let inner = street.rect.cells().filter(|&(x, y)| {
            let before = street.rect.contains(x - lx, y - ly);
            let after = street.rect.contains(x + lx, y + ly);
            before && after
        });
        for (x, y) in inner {
            assert_eq!(structures.get(x, y), Tile::Nothing);
            assert_eq!(level.map.layer(LayerKind::Ground).get(x, y), Tile::Room2);
        }
    }
}

/// Both end rows of every street are uniform: fully capped or fully open
fn assert_caps_uniform(level: &GeneratedLevel) {
    let ground = level.map.layer(LayerKind::Ground);
    let structures = level.map.layer(LayerKind::Structures);
    for (_, street) in level.areas.streets() {
        if street.rect.is_empty() {
            continue;
        }
        let (ax, ay) = street.across();
        let width = if street.horizontal {
            street.rect.h
        } else {
            street.rect.w
        };
        let ends = [
            (street.rect.x, street.rect.y, ax, ay),
            (street.rect.right() - 1, street.rect.bottom() - 1, -ax, -ay),
        ];
        for (ex, ey, dx, dy) in ends {
            let cells: Vec<_> = (0..width)
                .map(|k| {
                    let (x, y) = (ex + dx * k, ey + dy * k);
                    (ground.get(x, y), structures.get(x, y))
                })
                .collect();
            assert!(cells.windows(2).all(|w| w[0] == w[1]), "{cells:?}");
            let capped = cells[0].1 == Tile::Wall2;
            if capped {
                assert_eq!(cells[0].0, Tile::Nothing);
            }
        }
    }
}

#[test]
fn test_caps_uniform() {
    for seed in SEEDS {
        assert_caps_uniform(&generate(&scenario(), &mut GameRng::new(seed)));
    }
}

#[test]
fn test_outer_street_ends_capped() {
    let level = generate(&scenario(), &mut GameRng::new(10));
    let root = level.areas.root();
    assert!(root.is_street());
    // The first street spans the whole map, so both of its ends face the edge
    let structures = level.map.layer(LayerKind::Structures);
    let (x0, y0) = (root.rect.x, root.rect.y);
    let (x1, y1) = (root.rect.right() - 1, root.rect.bottom() - 1);
    assert_eq!(structures.get(x0, y0), Tile::Wall2);
    assert_eq!(structures.get(x1, y1), Tile::Wall2);
}

#[test]
fn test_critical_distance() {
    let level = generate(&scenario(), &mut GameRng::new(17));
    let up = level.stairs_up.unwrap().room;
    assert_eq!(level.critical_distance[up.0], Some(1));
    assert_eq!(level.critical_distance[AreaTree::ROOT.0], Some(1));
    for (id, area) in level.areas.iter() {
        if let Some(d) = level.critical_distance[id.0] {
            assert!(d >= 1);
            assert_eq!(d == 1, area.is_on_critical_path());
        }
    }
    // Every room with a door is measured
    for (id, area) in level.areas.rooms() {
        if area.is_connected() {
            assert!(level.critical_distance[id.0].is_some());
        }
    }
}

#[test]
fn test_recorded_stairs_on_map_with_tiny_rooms() {
    // Odd street widths can squeeze a block down to nothing
    let config = GeneratorConfig {
        width: 10,
        height: 10,
        splits: 3,
        min_room_size: 1,
        corridor_width: 1,
        ..GeneratorConfig::default()
    };
    assert!(config.validate().is_ok());
    for seed in 0..64 {
        let level = generate(&config, &mut GameRng::new(seed));
        let structures = level.map.layer(LayerKind::Structures);
        if let Some(up) = level.stairs_up {
            assert!(level.areas[up.room].has_floor(), "seed {seed}");
            assert_eq!(structures.get(up.x, up.y), Tile::StairsUp, "seed {seed}");
        }
        if let Some(down) = level.stairs_down {
            assert!(level.areas[down.room].has_floor(), "seed {seed}");
            assert_eq!(structures.get(down.x, down.y), Tile::StairsDown, "seed {seed}");
        }
        let ups = level.map.find_tiles(LayerKind::Structures, Tile::StairsUp);
        assert_eq!(ups.len(), usize::from(level.stairs_up.is_some()), "seed {seed}");
    }
}

#[test]
fn test_extreme_json_values_degrade() {
    let huge = GeneratorConfig::from_json(r#"{ "min_room_size": 2147483647 }"#).unwrap();
    let level = generate(&huge, &mut GameRng::new(1));
    assert_eq!(level.areas.len(), 1);
    assert!(level.stairs_up.is_none());

    let wide = GeneratorConfig::from_json(r#"{ "width": 2147483647, "height": 2147483647 }"#)
        .unwrap();
    assert!(wide.validate().is_err());
    let level = generate(&wide, &mut GameRng::new(1));
    assert_eq!(level.map.width(), 0);
    assert_eq!(level.map.height(), 0);
    assert!(level.areas.root().rect.is_empty());
}

#[test]
fn test_unsplittable_map() {
    let config = GeneratorConfig {
        min_room_size: 15,
        ..GeneratorConfig::with_size(20, 20)
    };
    let level = generate(&config, &mut GameRng::new(3));
    assert_eq!(level.areas.len(), 1);
    assert!(level.stairs_up.is_none());
    assert!(level.stairs_down.is_none());
    assert!(level.doors.is_empty());
    // The single room is still carved
    assert_eq!(level.map.layer(LayerKind::Ground).get(10, 10), Tile::Room);
    assert_eq!(level.map.layer(LayerKind::Structures).get(0, 0), Tile::Wall2);
}

#[test]
fn test_empty_map() {
    let level = generate(&GeneratorConfig::with_size(0, 0), &mut GameRng::new(3));
    assert_eq!(level.map.width(), 0);
    assert!(level.stairs_up.is_none());
    assert!(level.map.symbol_rows().is_empty());
}

#[test]
fn test_entities_untouched() {
    let level = generate(&scenario(), &mut GameRng::new(8));
    assert!(level.map.layer(LayerKind::Entities).tiles().iter().all(|t| t.is_empty()));
}

#[test]
fn test_spawn_on_generated_level() {
    let mut rng = GameRng::new(12);
    let mut level = generate_for_depth(-2, &scenario(), &mut rng);
    let room = level.areas[level.stairs_down.unwrap().room].rect.inset(1);
    let (x, y) = level
        .map
        .layer_mut(LayerKind::Entities)
        .place_in_area_if_empty(&mut rng, room, Tile::Mob)
        .unwrap();
    assert!(level.map.is_passable(x, y));
    assert_eq!(level.map.visible_tile(x, y), Tile::Mob);
}

#[test]
fn test_surface_has_no_up_stair() {
    let level = generate_for_depth(0, &scenario(), &mut GameRng::new(4));
    assert!(level.map.find_tiles(LayerKind::Structures, Tile::StairsUp).is_empty());
    assert_eq!(
        level.map.find_tiles(LayerKind::Structures, Tile::StairsDown).len(),
        2
    );
}
