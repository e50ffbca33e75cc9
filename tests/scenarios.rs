use envshaper::{
    BLOCK_SAMPLES, BlockPool, BlockQueue, ConstantSource, EnvelopeConfig, EnvelopeState,
    FULL_SCALE, SILENCE, ShapedEnvelope, WhiteNoise,
};
use rand::SeedableRng;
use std::sync::Arc;
use std::thread;

fn gains(env: &mut ShapedEnvelope, count: usize) -> Vec<i32> {
    (0..count).map(|_| env.next_gain()).collect()
}

fn largest_step(trace: &[i32]) -> i32 {
    trace
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .max()
        .unwrap_or(0)
}

/// Number of times the envelope enters `state` over `count` samples.
fn entries(env: &mut ShapedEnvelope, state: EnvelopeState, count: usize) -> usize {
    let mut previous = env.state();
    let mut entered = 0;
    for _ in 0..count {
        env.next_gain();
        if env.state() == state && previous != state {
            entered += 1;
        }
        previous = env.state();
    }
    entered
}

fn stream(blocks: usize, level: i16) -> (Arc<BlockPool>, BlockQueue) {
    let pool = Arc::new(BlockPool::new(blocks.max(1)));
    let mut queue = BlockQueue::new(pool.clone());
    let mut source = ConstantSource::new(level);
    for _ in 0..blocks {
        assert!(queue.push_from(&mut source));
    }
    (pool, queue)
}

#[test]
fn test_single_attack_decay_then_silence() {
    let mut env = ShapedEnvelope::new(EnvelopeConfig::new(10, 0, 10));
    env.note_on();
    let trace = gains(&mut env, 40);

    assert_eq!(trace[0], SILENCE);
    assert!(trace[..10].windows(2).all(|w| w[0] < w[1]));
    assert_eq!(trace[10], FULL_SCALE);
    assert!(trace[10..20].windows(2).all(|w| w[0] > w[1]));
    assert!(trace[19] < FULL_SCALE / 20);
    assert!(trace[20..].iter().all(|&g| g == SILENCE));
    assert_eq!(env.state(), EnvelopeState::Idle);
}

#[test]
fn test_single_cycle_through_blocks() {
    let (pool, mut queue) = stream(2, i16::MAX);
    let mut env = ShapedEnvelope::new(EnvelopeConfig::new(10, 0, 10));
    env.note_on();

    env.update(&mut queue);
    let output = queue.output();
    assert_eq!(output.len(), BLOCK_SAMPLES);
    assert_eq!(output[0], 0);
    assert!(output[1..20].iter().all(|&s| s > 0));
    assert!(output[20..].iter().all(|&s| s == 0));

    // Idle: the block is released without being passed on
    env.update(&mut queue);
    assert_eq!(queue.transmitted(), 1);
    assert_eq!(queue.released(), 2);
    assert_eq!(pool.available(), 2);
}

#[test]
fn test_retriggers_repeat_cycle() {
    let mut env = ShapedEnvelope::new(EnvelopeConfig::new(10, 0, 10).with_max_retriggers(2));
    env.note_on();

    // Initial trigger already entered the first attack
    let repeats = entries(&mut env, EnvelopeState::Attack, 100);
    assert_eq!(repeats, 2);
    assert_eq!(env.state(), EnvelopeState::Idle);
}

#[test]
fn test_retriggers_shape_each_cycle_alike() {
    let mut env = ShapedEnvelope::new(EnvelopeConfig::new(10, 0, 10).with_max_retriggers(2));
    env.note_on();
    let trace = gains(&mut env, 80);

    assert_eq!(&trace[0..20], &trace[20..40]);
    assert_eq!(&trace[0..20], &trace[40..60]);
    assert!(trace[60..].iter().all(|&g| g == SILENCE));
}

#[test]
fn test_phase_sequence_with_hold_and_retrigger() {
    use EnvelopeState::*;

    let mut env = ShapedEnvelope::new(EnvelopeConfig::new(2, 1, 2).with_max_retriggers(1));
    env.note_on();
    let visited: Vec<EnvelopeState> = (0..11)
        .map(|_| {
            env.next_gain();
            env.state()
        })
        .collect();

    assert_eq!(
        visited,
        vec![
            Attack, Attack, Hold, Decay, Decay, Attack, Attack, Hold, Decay, Decay, Idle
        ]
    );
}

#[test]
fn test_exhausted_decay_zeroes_rest_of_block() {
    let (_pool, mut queue) = stream(1, 12_000);
    let mut env = ShapedEnvelope::new(EnvelopeConfig::new(30, 10, 30).with_max_retriggers(0));
    env.note_on();
    env.update(&mut queue);

    let output = queue.output();
    assert!(output[1..70].iter().all(|&s| s > 0));
    assert!(output[70..].iter().all(|&s| s == 0));
}

#[test]
fn test_forced_ramp_avoids_click() {
    let config = EnvelopeConfig::new(10, 0, 10).with_forced_decay(5);

    let mut undisturbed = ShapedEnvelope::new(config);
    undisturbed.note_on();
    let natural = largest_step(&gains(&mut undisturbed, 20));

    let mut env = ShapedEnvelope::new(config);
    env.note_on();
    let mut trace = gains(&mut env, 13);
    assert_eq!(env.state(), EnvelopeState::Decay);

    env.note_on();
    assert_eq!(env.state(), EnvelopeState::Forced);
    let ramp = gains(&mut env, 5);
    assert_eq!(ramp[0], trace[12]);
    assert!(ramp.windows(2).all(|w| w[0] > w[1]));
    trace.extend_from_slice(&ramp);

    let restart = gains(&mut env, 10);
    assert_eq!(env.state(), EnvelopeState::Attack);
    assert_eq!(restart[0], SILENCE);
    trace.extend_from_slice(&restart);

    assert!(largest_step(&trace) <= natural);
}

#[test]
fn test_retrigger_without_forced_decay_jumps() {
    let config = EnvelopeConfig::new(10, 0, 10);

    let mut undisturbed = ShapedEnvelope::new(config);
    undisturbed.note_on();
    let natural = largest_step(&gains(&mut undisturbed, 20));

    let mut env = ShapedEnvelope::new(config);
    env.note_on();
    let mut trace = gains(&mut env, 13);
    env.note_on();
    assert_eq!(env.state(), EnvelopeState::Attack);
    trace.extend(gains(&mut env, 5));

    assert_eq!(trace[13], SILENCE);
    assert!(largest_step(&trace) > natural);
}

#[test]
fn test_trigger_while_idle_is_history_independent() {
    let config = EnvelopeConfig::new(12, 3, 12)
        .with_forced_decay(4)
        .with_max_retriggers(1);

    let mut reference = ShapedEnvelope::new(config);
    reference.note_on();
    let expected = gains(&mut reference, 80);

    let mut env = ShapedEnvelope::new(config);
    for history in [5usize, 17, 31] {
        env.note_on();
        gains(&mut env, history);
        env.note_on();
        gains(&mut env, 200);
        assert_eq!(env.state(), EnvelopeState::Idle);

        env.note_on();
        assert_eq!(gains(&mut env, 80), expected);
    }
}

#[test]
fn test_missing_block_skips_tick() {
    let pool = Arc::new(BlockPool::new(1));
    let mut queue = BlockQueue::new(pool);
    let mut env = ShapedEnvelope::new(EnvelopeConfig::new(10, 0, 10));
    env.note_on();

    env.update(&mut queue);
    assert_eq!(env.remaining(), 10);
    assert_eq!(queue.transmitted(), 0);
    assert_eq!(queue.released(), 0);
}

#[test]
fn test_trigger_from_control_thread() {
    let pool = Arc::new(BlockPool::new(4));
    let mut queue = BlockQueue::new(pool);
    let rng = rand::rngs::StdRng::seed_from_u64(3);
    let mut noise = WhiteNoise::with_rng(rng);

    let config = EnvelopeConfig::new(300, 50, 300)
        .with_forced_decay(32)
        .with_max_retriggers(1);
    let mut env = ShapedEnvelope::new(config);
    let trigger = env.trigger_handle();

    let control = thread::spawn(move || {
        for _ in 0..20 {
            trigger.note_on();
            thread::yield_now();
        }
    });

    for _ in 0..200 {
        queue.push_from(&mut noise);
        env.update(&mut queue);
    }
    control.join().unwrap();

    // Pick up anything sent after the last block, then run out
    for _ in 0..30 {
        queue.push_from(&mut noise);
        env.update(&mut queue);
    }

    assert_eq!(env.trigger_handle().pending(), 0);
    assert_eq!(env.state(), EnvelopeState::Idle);
    assert!(queue.transmitted() > 0);
}
