use allocvec::{
    prelude::*,
    alloc::{composable::{BudgetAllocator, CountingAllocator}, primitives::{LinearAllocator, Mallocator}},
    mem::get_memory_manager,
};
use allocvec_logging::{log_info, log_error, LogCategory, LogLevel, Logger, set_logger, clear_logger};

pub const LOG_CAT : LogCategory = LogCategory::new("Main");

static LOGGER : Logger = Logger::new();

fn setup_globals() {
    LOGGER.set_max_level(LogLevel::Verbose);
    set_logger(&LOGGER);
}

fn main() {
    setup_globals();

    actual_main();

    let stats = get_memory_manager().stats();
    log_info!(LOG_CAT, "Global allocations: {} total, {} live ({} bytes)", stats.total_allocs, stats.live_allocs, stats.live_bytes);

    clear_logger();
}

fn actual_main() {
    let mut v = vector![1, 2, 3];
    if let Err(err) = v.push(4) {
        log_error!(LOG_CAT, actual_main, "Failed to push: {}", err);
        return;
    }
    log_info!(LOG_CAT, "v = {:?}, len = {}, capacity = {}", v, v.len(), v.capacity());

    match v.slice(1, 3) {
        Ok(slice) => log_info!(LOG_CAT, "v[1..3] = {:?}", slice),
        Err(err) => log_error!(LOG_CAT, actual_main, "{}", err),
    }
    if let Err(err) = v.slice(0, v.len()) {
        log_info!(LOG_CAT, "v[0..{}] is rejected: {}", v.len(), err);
    }

    let w = vector![5, 6];
    let joined = &v + &w;
    log_info!(LOG_CAT, "{:?} ~ {:?} = {:?}", v, w, joined);

    // Growth through a counting allocator
    let counting = CountingAllocator::new(Mallocator);
    let stats = counting.stats();
    let mut counted: Vector<u64, _> = Vector::new_in(counting);
    for i in 0..1000 {
        if let Err(err) = counted.push(i) {
            log_error!(LOG_CAT, actual_main, "Failed to push: {}", err);
            return;
        }
    }
    log_info!(LOG_CAT, "1000 pushes: {} allocation(s), {} grow(s), capacity {}", stats.allocs(), stats.grows(), counted.capacity());

    // Growth failure is reported, and leaves the vector untouched
    let mut budgeted: Vector<u32, _> = Vector::new_in(BudgetAllocator::new(Mallocator, 16));
    for i in 0..4 {
        if let Err(err) = budgeted.push(i) {
            log_info!(LOG_CAT, "push({}) failed: {}, vector is still {:?}", i, err, budgeted);
        }
    }

    // Shrinking in a bump allocator
    let Some(linear) = LinearAllocator::new(KiB(1)) else {
        log_error!(LOG_CAT, actual_main, "Failed to create linear allocator");
        return;
    };
    let mut bumped: Vector<u32, _> = Vector::new_in(linear);
    if let Err(err) = bumped.append_iter(0..10) {
        log_error!(LOG_CAT, actual_main, "Failed to append: {}", err);
        return;
    }
    let shrunk = bumped.shrink_to(4);
    log_info!(LOG_CAT, "shrink_to(4) = {}, {:?}, {} bytes used", shrunk, bumped, bumped.allocator().used());

    log_info!(LOG_CAT, "pop_front: {:?}", v.pop_front());
}
