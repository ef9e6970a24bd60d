//! Mock version of an entity store.
use mockall::mock;

use batch_import_rs::error::ImportError;
use batch_import_rs::store::EntityStore;

use super::Employee;

mock! {
    pub Store {}
    impl EntityStore<Employee> for Store {
        fn add_batch(&self, entities: Vec<Employee>) -> Result<(), ImportError>;
        fn commit(&self) -> Result<(), ImportError>;
    }
}
