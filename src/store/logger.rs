use std::fmt::Debug;

use log::info;

use crate::error::ImportError;
use crate::store::EntityStore;

/// A store that logs entities instead of persisting them, useful for
/// debugging pipelines.
#[derive(Default)]
pub struct LoggerStore {}

impl<E> EntityStore<E> for LoggerStore
where
    E: Debug,
{
    fn add_batch(&self, entities: Vec<E>) -> Result<(), ImportError> {
        entities.iter().for_each(|entity| info!("Entity:{:?}", entity));
        Ok(())
    }

    fn commit(&self) -> Result<(), ImportError> {
        Ok(())
    }
}
