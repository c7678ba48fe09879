use pathwalk_core::{Collectible, Direction, NullSink, Point, RecordingSink, SinkEvent, TileKind};
use pathwalk_gen::{Config, Generator, Phase};

fn line_config() -> Config {
    Config {
        x_size: 10,
        y_size: 10,
        map_scale: 1.0,
        max_floor_count: 5,
        path_walker_distance: 5,
        child_spawn_chance: 0,
        room_spawn_chance: 0,
        chance_forward: 100,
        chance_left: 0,
        chance_right: 0,
        chance_backward: 0,
        initial_facings: vec![Direction::Right],
        ..Config::default()
    }
}

#[test]
fn single_walker_carves_a_straight_line() {
    let mut g = Generator::new(line_config(), RecordingSink::new()).unwrap();
    let summary = g.run(None).unwrap();

    assert_eq!(summary.ticks, 5);
    assert_eq!(summary.walkers_spawned, 1);
    assert_eq!(summary.floor_count, 5);
    let grid = g.grid();
    for x in 5..10 {
        assert!(grid.is_floor(Point::new(x, 5)), "({x}, 5) not carved");
    }
    assert_eq!(
        grid.collectibles().collect::<Vec<_>>(),
        vec![(Point::new(9, 5), Collectible::AmmoChest)]
    );
    assert_eq!(summary.weapon_chest, None);
    assert_eq!(summary.ammo_chest.map(|r| r.pos), Some(Point::new(9, 5)));
    // Columns 4..=9 of rows 4..=6, minus the line itself.
    assert_eq!(summary.walls, 13);
    assert_eq!(grid.count(TileKind::Wall), 13);
    assert!(grid.is_wall(Point::new(4, 5)));
    assert!(grid.is_wall(Point::new(9, 6)));
    let rows: Vec<_> = grid.render_ascii().lines().map(str::to_owned).collect();
    assert_eq!(rows[3], "    ######");
    assert_eq!(rows[4], "    #....a");
    assert_eq!(rows[5], "    ######");
    assert_eq!(g.sink().count(|e| matches!(e, SinkEvent::WalkerDestroyed(_))), 1);
}

#[test]
fn turning_back_every_step_keeps_the_furthest_weapon_chest() {
    let config = Config {
        chance_forward: 0,
        chance_backward: 100,
        path_walker_distance: 4,
        max_floor_count: 100,
        ..line_config()
    };
    let mut g = Generator::new(config, RecordingSink::new()).unwrap();
    let summary = g.run(None).unwrap();

    assert_eq!(summary.floor_count, 2);
    let placed = g
        .sink()
        .count(|e| matches!(e, SinkEvent::CollectiblePlaced(_, Collectible::WeaponChest)));
    assert_eq!(placed, 4);
    let removed = g
        .sink()
        .count(|e| matches!(e, SinkEvent::CollectibleRemoved(_, Collectible::WeaponChest)));
    assert_eq!(removed, 3);

    let weapon = summary.weapon_chest.unwrap();
    assert_eq!(weapon.pos, Point::new(4, 5));
    assert_eq!(weapon.distance, 1.0);
    assert_eq!(g.collectibles().of_kind(Collectible::WeaponChest).count(), 1);
    // The origin cell lost its chest; the kept cell shows the ammo chest
    // dropped on top of it when the walker stopped there.
    assert_eq!(g.grid().at(Point::new(5, 5)).unwrap().collectible, None);
    assert_eq!(
        g.grid().at(Point::new(4, 5)).unwrap().collectible,
        Some(Collectible::AmmoChest)
    );
}

#[test]
fn one_step_walker_still_hands_down_a_child() {
    let config = Config {
        path_walker_distance: 1,
        child_spawn_chance: 100,
        ..line_config()
    };
    let mut g = Generator::new(config, RecordingSink::new()).unwrap();
    let summary = g.run(Some(100)).unwrap();
    assert_eq!(summary.walkers_spawned, 2);
    assert_eq!(summary.ticks, 2);
    assert_eq!(g.sink().count(|e| matches!(e, SinkEvent::WalkerDestroyed(_))), 2);
    // Both walkers stop on the seed cell.
    assert_eq!(
        g.sink()
            .count(|e| matches!(e, SinkEvent::CollectiblePlaced(_, Collectible::AmmoChest))),
        2
    );
    assert_eq!(summary.ammo_chest.map(|r| r.pos), Some(Point::new(5, 5)));
}

#[test]
fn oversized_rooms_are_clipped_to_the_map() {
    let config = Config {
        x_size: 10,
        y_size: 10,
        room_spawn_chance: 100,
        room_size_x: i32::MAX,
        room_size_y: i32::MAX,
        ..Config::default()
    };
    config.validate().unwrap();
    let mut g = Generator::new(config, NullSink).unwrap();
    let summary = g.run(Some(1000)).unwrap();
    // The first room covers everything from the centre up and right.
    for p in pathwalk_core::Range::new(5, 5, 10, 10) {
        assert!(g.grid().is_floor(p), "{p} not carved");
    }
    assert!(summary.floor_count >= 25);
}

fn varied_configs() -> Vec<Config> {
    let base = Config {
        x_size: 30,
        y_size: 30,
        max_floor_count: 120,
        ..Config::default()
    };
    vec![
        base.clone(),
        Config {
            child_spawn_chance: 100,
            path_walker_distance: 16,
            ..base.clone()
        },
        Config {
            room_spawn_chance: 100,
            room_size_x: 5,
            room_size_y: 2,
            ..base.clone()
        },
        Config {
            chance_forward: 0,
            chance_left: 0,
            chance_right: 0,
            chance_backward: 0,
            ..base.clone()
        },
        Config {
            x_size: 1,
            y_size: 1,
            ..base.clone()
        },
        Config {
            max_floor_count: 0,
            ..base
        },
    ]
}

#[test]
fn every_run_terminates() {
    for (i, config) in varied_configs().into_iter().enumerate() {
        for seed in 0..20 {
            let mut g = Generator::new(Config { seed, ..config.clone() }, NullSink).unwrap();
            let result = g.run(Some(10_000));
            assert!(result.is_ok(), "config {i} seed {seed}: {result:?}");
            assert_eq!(g.phase(), Phase::Complete);
            assert!(g.live_walkers().is_empty());
        }
    }
}

#[test]
fn floor_is_fully_enclosed() {
    for config in varied_configs() {
        for seed in 0..10 {
            let mut g = Generator::new(Config { seed, ..config.clone() }, NullSink).unwrap();
            g.run(None).unwrap();
            let grid = g.grid();
            for (p, tile) in grid.iter() {
                if !tile.is_floor() {
                    continue;
                }
                for q in p.neighborhood().intersect(grid.bounds()) {
                    assert!(grid.at(q).is_some(), "{q} next to floor {p} is empty");
                }
            }
        }
    }
}

#[test]
fn a_lone_walker_overshoots_the_floor_budget_by_at_most_one() {
    for seed in 0..30 {
        let config = Config {
            x_size: 40,
            y_size: 40,
            max_floor_count: 25,
            path_walker_distance: 200,
            child_spawn_chance: 0,
            room_spawn_chance: 0,
            seed,
            ..Config::default()
        };
        let mut g = Generator::new(config, NullSink).unwrap();
        let summary = g.run(None).unwrap();
        assert!(summary.floor_count <= 26, "seed {seed}: {}", summary.floor_count);
    }
}

#[test]
fn at_most_one_chest_of_each_kind_survives() {
    for seed in 0..20 {
        let mut g = Generator::new(
            Config {
                seed,
                ..varied_configs()[0].clone()
            },
            NullSink,
        )
        .unwrap();
        g.run(None).unwrap();
        for kind in Collectible::ALL {
            assert!(g.collectibles().of_kind(kind).count() <= 1);
            assert!(g.grid().collectibles().filter(|&(_, c)| c == kind).count() <= 1);
        }
        // The first walker always drops an ammo chest when it stops.
        assert_eq!(g.collectibles().of_kind(Collectible::AmmoChest).count(), 1);
    }
}

#[test]
fn same_seed_same_map_whatever_the_driver() {
    let config = Config {
        seed: 42,
        tick_interval: 4,
        ..varied_configs()[1].clone()
    };

    let mut by_run = Generator::new(config.clone(), RecordingSink::new()).unwrap();
    let summary = by_run.run(None).unwrap();

    let mut by_tick = Generator::new(config.clone(), RecordingSink::new()).unwrap();
    by_tick.start_generation().unwrap();
    while !by_tick.tick().unwrap() {}

    let mut by_frame = Generator::new(config, RecordingSink::new()).unwrap();
    by_frame.start_generation().unwrap();
    let mut frames = 0u64;
    while !by_frame.frame().unwrap() {
        frames += 1;
    }

    assert_eq!(by_tick.summary(), Some(&summary));
    assert_eq!(by_frame.summary(), Some(&summary));
    assert_eq!(by_run.grid(), by_tick.grid());
    assert_eq!(by_run.grid(), by_frame.grid());
    assert_eq!(by_run.sink().events, by_frame.sink().events);
    assert_eq!(frames + 1, summary.ticks * 4);
}

#[test]
fn different_seeds_give_different_maps() {
    let config = varied_configs()[0].clone();
    let mut a = Generator::new(Config { seed: 1, ..config.clone() }, NullSink).unwrap();
    let mut b = Generator::new(Config { seed: 2, ..config }, NullSink).unwrap();
    a.run(None).unwrap();
    b.run(None).unwrap();
    assert_ne!(a.grid(), b.grid());
}
