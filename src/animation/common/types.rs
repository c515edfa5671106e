use std::sync::{Arc, Mutex};

pub type Threadable<T> = Arc<Mutex<T>>;

pub fn threadable_new<T>(t: T) -> Threadable<T> {
    Arc::new(Mutex::new(t))
}
