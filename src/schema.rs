//! Startup-time schema synchronization.
//!
//! The physical schema is derived entirely from the entity declarations in
//! [`crate::entity`]; there is no hand-written SQL surface. Synchronization
//! runs as three typed phases, each returning a `Result` so a failure
//! short-circuits startup instead of leaving a half-wired schema in use:
//!
//! 1. **Register** — every entity's `CREATE TABLE` statement is built in a
//!    fixed registry order ([`RegisteredSchema::register`]).
//! 2. **Associate** — the foreign-key graph declared by the entities is
//!    validated against the registry: every target must exist and must be
//!    registered before any table that references it, so the statements can
//!    be executed in registration order ([`RegisteredSchema::associate`]).
//! 3. **Apply** — the DDL is executed on the shared connection. Under
//!    `force` all registered tables are dropped first, in reverse
//!    registration order ([`AssociatedSchema::apply`]).
//!
//! There is no rollback across phases; schema setup is expected to run once,
//! before the process accepts requests, and to be restarted on failure.

use sea_orm::sea_query::{Alias, ForeignKeyAction, Table, TableCreateStatement, TableRef};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityName, EntityTrait, Iterable,
    RelationTrait, Schema,
};
use thiserror::Error;
use tracing::{error, info};

use crate::entity::{
    authentication_token, booking, director, genre, hall, movie, movie_genre, seat, show, user,
};

/// Failures raised by the synchronization phases.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Two entities registered the same table name.
    #[error("table `{table}` is registered more than once")]
    DuplicateTable { table: String },

    /// A foreign key points at a table that is not in the registry at all.
    #[error("`{from}` declares a foreign key to `{to}`, which is not registered")]
    UnknownTarget { from: String, to: String },

    /// A foreign key points at a table registered after its dependent, so
    /// executing the statements in order would fail.
    #[error("`{from}` declares a foreign key to `{to}`, which is registered after it")]
    TargetRegisteredLater { from: String, to: String },

    #[error(transparent)]
    Database(#[from] DbErr),
}

/// One registered entity: its table name, the DDL derived from the entity
/// declaration, and the foreign keys it declares.
struct TableDef {
    name: String,
    create: TableCreateStatement,
    foreign_keys: Vec<ForeignKeyRef>,
}

struct ForeignKeyRef {
    target: String,
    cascade_delete: bool,
}

/// Output of the registration phase: every entity's table statement, in
/// creation order, not yet validated against each other.
pub struct RegisteredSchema {
    tables: Vec<TableDef>,
}

/// Output of the association phase: a registry whose foreign-key graph has
/// been checked to be closed and creation-ordered.
pub struct AssociatedSchema {
    tables: Vec<TableDef>,
}

impl RegisteredSchema {
    /// Builds the table statement for every entity, in the fixed registry
    /// order. Referenced tables come before their dependents so that the
    /// statements can later be executed front to back.
    pub fn register(backend: DbBackend) -> Result<Self, SchemaError> {
        let schema = Schema::new(backend);
        let defs = [
            table_def(hall::Entity, &schema),
            table_def(director::Entity, &schema),
            table_def(genre::Entity, &schema),
            table_def(user::Entity, &schema),
            table_def(authentication_token::Entity, &schema),
            table_def(seat::Entity, &schema),
            table_def(movie::Entity, &schema),
            table_def(movie_genre::Entity, &schema),
            table_def(show::Entity, &schema),
            table_def(booking::Entity, &schema),
        ];

        let mut tables: Vec<TableDef> = Vec::with_capacity(defs.len());
        for def in defs {
            if tables.iter().any(|table| table.name == def.name) {
                return Err(SchemaError::DuplicateTable { table: def.name });
            }
            tables.push(def);
        }
        Ok(Self { tables })
    }

    /// Validates the association graph: every foreign key declared by a
    /// registered entity must point at a table registered earlier. The first
    /// violation aborts the whole step.
    pub fn associate(self) -> Result<AssociatedSchema, SchemaError> {
        for (position, table) in self.tables.iter().enumerate() {
            for fk in &table.foreign_keys {
                match self.tables.iter().position(|t| t.name == fk.target) {
                    None => {
                        return Err(SchemaError::UnknownTarget {
                            from: table.name.clone(),
                            to: fk.target.clone(),
                        });
                    }
                    Some(target) if target >= position => {
                        return Err(SchemaError::TargetRegisteredLater {
                            from: table.name.clone(),
                            to: fk.target.clone(),
                        });
                    }
                    Some(_) => {
                        info!(
                            from = %table.name,
                            to = %fk.target,
                            cascade = fk.cascade_delete,
                            "association declared"
                        );
                    }
                }
            }
        }
        Ok(AssociatedSchema {
            tables: self.tables,
        })
    }
}

impl AssociatedSchema {
    /// Executes the DDL on the shared connection. Without `force`, tables are
    /// created with `IF NOT EXISTS`, so re-running against an existing schema
    /// never drops data. With `force`, every registered table is dropped
    /// first, in reverse registration order (dependents before their
    /// targets), and the schema is rebuilt from scratch.
    pub async fn apply(&self, db: &DatabaseConnection, force: bool) -> Result<(), SchemaError> {
        let backend = db.get_database_backend();
        if force {
            for table in self.tables.iter().rev() {
                let mut drop = Table::drop();
                drop.table(Alias::new(table.name.as_str())).if_exists();
                db.execute(backend.build(&drop)).await?;
            }
        }
        for table in &self.tables {
            db.execute(backend.build(&table.create)).await?;
        }
        Ok(())
    }
}

/// Runs all three phases against the given connection. Every failure is
/// logged and returned; callers are expected to abort startup on error.
pub async fn synchronize(db: &DatabaseConnection, force: bool) -> Result<(), SchemaError> {
    let registered = RegisteredSchema::register(db.get_database_backend())
        .inspect_err(|e| error!("entity registration failed: {e}"))?;
    let associated = registered
        .associate()
        .inspect_err(|e| error!("association building failed: {e}"))?;
    associated
        .apply(db, force)
        .await
        .inspect_err(|e| error!("schema synchronization failed: {e}"))?;
    info!(force, "schema synchronized");
    Ok(())
}

fn table_def<E>(entity: E, schema: &Schema) -> TableDef
where
    E: EntityTrait,
{
    let name = entity.table_name().to_owned();
    let mut create = schema.create_table_from_entity(entity);
    create.if_not_exists();

    // Foreign keys live on the relation definitions of the owning side; the
    // `is_owner` half of each pair is the inverse and carries no key.
    let foreign_keys = E::Relation::iter()
        .map(|relation| relation.def())
        .filter(|def| !def.is_owner)
        .map(|def| ForeignKeyRef {
            target: table_ref_name(&def.to_tbl),
            cascade_delete: matches!(def.on_delete, Some(ForeignKeyAction::Cascade)),
        })
        .collect();

    TableDef {
        name,
        create,
        foreign_keys,
    }
}

fn table_ref_name(table: &TableRef) -> String {
    match table {
        TableRef::Table(iden) => iden.to_string(),
        TableRef::SchemaTable(_, iden) => iden.to_string(),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered() -> RegisteredSchema {
        RegisteredSchema::register(DbBackend::Sqlite).expect("registry must build")
    }

    #[test]
    fn registry_order_is_creation_safe() {
        registered().associate().expect("registry order must hold");
    }

    #[test]
    fn join_table_cascades_both_ways() {
        let schema = registered();
        let join = schema
            .tables
            .iter()
            .find(|t| t.name == "movie_genres")
            .expect("join table registered");
        assert_eq!(join.foreign_keys.len(), 2);
        assert!(join.foreign_keys.iter().all(|fk| fk.cascade_delete));
    }

    #[test]
    fn show_references_do_not_cascade() {
        let schema = registered();
        let shows = schema
            .tables
            .iter()
            .find(|t| t.name == "shows")
            .expect("shows registered");
        assert_eq!(shows.foreign_keys.len(), 3);
        assert!(shows.foreign_keys.iter().all(|fk| !fk.cascade_delete));
    }

    #[test]
    fn reversed_registry_is_rejected() {
        let mut schema = registered();
        schema.tables.reverse();
        assert!(matches!(
            schema.associate(),
            Err(SchemaError::TargetRegisteredLater { .. })
        ));
    }

    #[test]
    fn unknown_target_is_rejected() {
        let mut schema = registered();
        let tokens = schema
            .tables
            .iter_mut()
            .find(|t| t.name == "auth_tokens")
            .expect("token table registered");
        tokens.foreign_keys[0].target = "ghosts".to_owned();
        assert!(matches!(
            schema.associate(),
            Err(SchemaError::UnknownTarget { .. })
        ));
    }
}
