use criterion::{criterion_group, criterion_main, Criterion, black_box};

use allocvec_common::{
    alloc::primitives::{Mallocator, LinearAllocator},
    collections::Vector,
    vector,
};

fn vector_new(c: &mut Criterion) {
    c.bench_function("Vector::new", |b| b.iter(|| {
        Vector::<u32>::new()
    }));
    c.bench_function("Vec::new", |b| b.iter(|| {
        Vec::<u32>::new()
    }));
    c.bench_function("Vector::with_capacity(64)", |b| b.iter(|| {
        Vector::<u32>::with_capacity(64)
    }));
    c.bench_function("Vec::with_capacity(64)", |b| b.iter(|| {
        Vec::<u32>::with_capacity(64)
    }));
}

fn vector_push(c: &mut Criterion) {
    c.bench_function("Vector::push(100) no reserve", |b| b.iter(|| {
        let mut arr = Vector::<u32>::new();
        for i in 0..100 {
            _ = arr.push(i);
        }
        arr
    }));
    c.bench_function("Vector::push(100) reserve", |b| b.iter(|| {
        let mut arr = Vector::<u32>::new();
        _ = arr.reserve(100);
        for i in 0..100 {
            _ = arr.push(i);
        }
        arr
    }));
    c.bench_function("Vector<Mallocator>::push(100) no reserve", |b| b.iter(|| {
        let mut arr = Vector::<u32, _>::new_in(Mallocator);
        for i in 0..100 {
            _ = arr.push(i);
        }
        arr
    }));
    c.bench_function("Vector<LinearAllocator>::push(100) no reserve", |b| b.iter(|| {
        let mut arr = Vector::<u32, _>::new_in(LinearAllocator::new(4096).unwrap());
        for i in 0..100 {
            _ = arr.push(i);
        }
        arr.len()
    }));

    c.bench_function("Vec::push(100) no reserve", |b| b.iter(|| {
        let mut arr = Vec::<u32>::new();
        for i in 0..100 {
            arr.push(i);
        }
        arr
    }));
    c.bench_function("Vec::push(100) reserve", |b| b.iter(|| {
        let mut arr = Vec::<u32>::new();
        arr.reserve(100);
        for i in 0..100 {
            arr.push(i);
        }
        arr
    }));
}

fn vector_index(c: &mut Criterion) {
    let arr = vector![5; 100];
    c.bench_function("Vector::index(100)", |b| b.iter(|| {
        for i in 0..100 {
            black_box(arr[i]);
        }
    }));
    c.bench_function("Vector::get(100)", |b| b.iter(|| {
        for i in 0..100 {
            _ = black_box(arr.get(i));
        }
    }));

    let vbuf = vec![5; 100];
    c.bench_function("Vec::index(100)", |b| b.iter(|| {
        for i in 0..100 {
            black_box(vbuf[i]);
        }
    }));
}

fn vector_clone(c: &mut Criterion) {
    let arr: Vector<u32> = (0..1000).collect();
    c.bench_function("Vector::clone(1000)", |b| b.iter(|| {
        arr.clone()
    }));

    let vbuf: Vec<u32> = (0..1000).collect();
    c.bench_function("Vec::clone(1000)", |b| b.iter(|| {
        vbuf.clone()
    }));
}

criterion_group!(vector_benches,
    vector_new,
    vector_push,
    vector_index,
    vector_clone
);
criterion_main!(vector_benches);
