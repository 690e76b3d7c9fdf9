use kary_collections::collections::contiguous::Vector;
use kary_collections::collections::heap::KAryHeap;

#[derive(Debug, Clone)]
struct MyZST;

impl Drop for MyZST {
    fn drop(&mut self) {
        println!("Dropped MyZST");
    }
}

fn main() {
    println!("\n[Vector]\n");

    let mut vec = Vector::<u8>::new();
    println!("{:?}", vec);

    for i in 0..8 {
        vec.push_back(i);
        println!("{:?}", vec);
    }

    println!("{:?}, {:?}", vec.pop_back(), vec);

    let copy = vec.clone();
    vec.clear();
    println!("{:?}, {:?}", vec, copy);

    println!("ZST Testing");

    let mut vec = Vector::<MyZST>::new();
    println!("{:?}", vec);

    for _ in 0..3 {
        vec.push_back(MyZST);
    }

    println!("{:?}", vec);
    drop(vec);

    println!("\n[KAryHeap]\n");

    for arity in 2..=4 {
        let mut heap = KAryHeap::with_arity(arity);
        for i in [20, 15, 30, 5, 10, 25, 1, 40] {
            heap.insert(i);
        }
        println!("{:?}", heap);

        while !heap.is_empty() {
            print!("{} ", heap.remove_min());
        }
        println!();
    }
}
