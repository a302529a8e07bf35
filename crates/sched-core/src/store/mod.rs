//! Colaboradores de persistencia: get-by-id sobre las tres entidades.
//!
//! El motor de resolución no conoce el almacenamiento; estos traits son
//! los colaboradores que la capa web usa para cargar entidades por
//! identificador antes de invocar la cascada. La implementación en
//! memoria asigna identificadores UUID en el primer `save` y devuelve
//! copias, de modo que el estado guardado nunca se muta por afuera.

use indexmap::IndexMap;
use log::debug;
use uuid::Uuid;

use sched_domain::{Model, Run, Template};

/// Entidad direccionable por identificador asignado por el store.
pub trait Identified {
    fn id(&self) -> Option<&str>;
    fn assign_id(&mut self, id: String);
    /// Nombre corto para logging.
    fn entity_name() -> &'static str;
}

impl Identified for Model {
    fn id(&self) -> Option<&str> {
        Model::id(self)
    }

    fn assign_id(&mut self, id: String) {
        self.set_id(Some(id));
    }

    fn entity_name() -> &'static str {
        "model"
    }
}

impl Identified for Template {
    fn id(&self) -> Option<&str> {
        Template::id(self)
    }

    fn assign_id(&mut self, id: String) {
        self.set_id(Some(id));
    }

    fn entity_name() -> &'static str {
        "template"
    }
}

impl Identified for Run {
    fn id(&self) -> Option<&str> {
        Run::id(self)
    }

    fn assign_id(&mut self, id: String) {
        self.set_id(Some(id));
    }

    fn entity_name() -> &'static str {
        "run"
    }
}

/// Acceso por identificador a una colección de entidades.
pub trait EntityStore<T> {
    /// Persiste la entidad, asignando un identificador si no tiene, y
    /// devuelve la copia guardada.
    fn save(&mut self, entity: T) -> T;
    /// Recupera una copia por identificador; `None` si no existe.
    fn get(&self, id: &str) -> Option<T>;
    /// Copias de todo lo guardado, en orden de inserción.
    fn list(&self) -> Vec<T>;
}

/// Store en memoria, suficiente para tests y para la demo. Mantiene el
/// orden de inserción.
#[derive(Debug, Clone)]
pub struct InMemoryStore<T> {
    items: IndexMap<String, T>,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self { items: IndexMap::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identified + Clone> EntityStore<T> for InMemoryStore<T> {
    fn save(&mut self, mut entity: T) -> T {
        let id = match entity.id() {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                entity.assign_id(id.clone());
                id
            }
        };
        debug!("save {} id={id}", T::entity_name());
        self.items.insert(id, entity.clone());
        entity
    }

    fn get(&self, id: &str) -> Option<T> {
        let found = self.items.get(id).cloned();
        debug!("get {} id={id} found={}", T::entity_name(), found.is_some());
        found
    }

    fn list(&self) -> Vec<T> {
        self.items.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_assigns_an_id_once() {
        let mut store: InMemoryStore<Model> = InMemoryStore::new();
        let model = Model::new("Surgery schedule").unwrap();
        let stored = store.save(model);
        let id = stored.id().expect("id asignado en el primer save").to_string();

        // un segundo save conserva el identificador
        let again = store.save(stored);
        assert_eq!(again.id(), Some(id.as_str()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_returns_a_copy() {
        let mut store: InMemoryStore<Template> = InMemoryStore::new();
        let stored = store.save(Template::for_model("m-1"));
        let id = stored.id().unwrap();

        let mut copy = store.get(id).unwrap();
        copy.set_label(Some("mutada".into()));
        // la copia mutada no afecta lo guardado
        assert_eq!(store.get(id).unwrap().label(), None);
    }

    #[test]
    fn missing_id_returns_none() {
        let store: InMemoryStore<Run> = InMemoryStore::new();
        assert!(store.get("no-such-id").is_none());
    }
}
