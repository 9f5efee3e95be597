use std::collections::HashMap;

use once_cell::sync::OnceCell;

use crate::descriptor::{FileDescriptor, RecordDescriptor};
use crate::enumeration::EnumDescriptor;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::types::ElementType;
use crate::value::Value;

/// Index of every record and enum type known to the process, keyed by fully
/// qualified name.
#[derive(Default, Debug, Clone)]
pub struct Registry {
    files: HashMap<&'static str, &'static FileDescriptor>,
    records: HashMap<&'static str, &'static RecordDescriptor>,
    enums: HashMap<&'static str, &'static EnumDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers all types of a file after registering its dependencies.
    /// Registering the same file twice is a no-op, while a different file
    /// under an already registered name is an error.
    ///
    /// On failure the registry is left as it was before the call.
    pub fn register_file(&mut self, file: &'static FileDescriptor) -> Result<()> {
        let mut staged = self.clone();
        staged.add_file(file, &mut Vec::new())?;
        *self = staged;
        Ok(())
    }

    fn add_file(
        &mut self,
        file: &'static FileDescriptor,
        pending: &mut Vec<&'static FileDescriptor>,
    ) -> Result<()> {
        if let Some(existing) = self.files.get(file.name) {
            if std::ptr::eq(*existing, file) {
                return Ok(());
            }

            return Err(Error::Registration(format!(
                "file {} is already registered with a different definition",
                file.name
            )));
        }

        if pending.iter().any(|p| p.name == file.name) {
            let chain = pending.iter().map(|p| p.name).collect::<Vec<_>>();
            return Err(Error::Registration(format!(
                "dependency cycle through {} ({} -> {})",
                file.name,
                chain.join(" -> "),
                file.name
            )));
        }

        pending.push(file);
        for dep in file.dependencies {
            self.add_file(*dep, pending)?;
        }
        pending.pop();

        for descriptor in file.enums {
            self.add_enum(descriptor())?;
        }

        let records = file.records.iter().map(|d| d()).collect::<Vec<_>>();
        for &descriptor in &records {
            self.add_record(descriptor)?;
        }

        // Types may reference each other within a file, so references are
        // resolved once everything in it is known.
        for descriptor in &records {
            self.check_references(descriptor)?;
        }

        self.files.insert(file.name, file);
        log::debug!(
            "registered {} ({} records, {} enums)",
            file.name,
            file.records.len(),
            file.enums.len()
        );

        Ok(())
    }

    fn add_enum(&mut self, descriptor: &'static EnumDescriptor) -> Result<()> {
        descriptor.validate()?;

        if let Some(existing) = self.enums.get(descriptor.name) {
            if std::ptr::eq(*existing, descriptor) {
                return Ok(());
            }

            return Err(Error::Registration(format!(
                "enum {} is already registered",
                descriptor.name
            )));
        }

        if self.records.contains_key(descriptor.name) {
            return Err(Error::Registration(format!(
                "{} is already registered as a record",
                descriptor.name
            )));
        }

        self.enums.insert(descriptor.name, descriptor);
        Ok(())
    }

    fn add_record(&mut self, descriptor: &'static RecordDescriptor) -> Result<()> {
        descriptor.validate()?;

        if let Some(existing) = self.records.get(descriptor.name) {
            if std::ptr::eq(*existing, descriptor) {
                return Ok(());
            }

            return Err(Error::Registration(format!(
                "record {} is already registered",
                descriptor.name
            )));
        }

        if self.enums.contains_key(descriptor.name) {
            return Err(Error::Registration(format!(
                "{} is already registered as an enum",
                descriptor.name
            )));
        }

        self.records.insert(descriptor.name, descriptor);
        Ok(())
    }

    fn check_references(&self, descriptor: &RecordDescriptor) -> Result<()> {
        for field in descriptor.fields {
            let found = match field.ty.element() {
                ElementType::Scalar(_) => true,
                ElementType::Enum(name) => self.enums.contains_key(name),
                ElementType::Message(name) => self.records.contains_key(name),
            };

            if !found {
                return Err(Error::Registration(format!(
                    "{}.{} references unregistered type {}",
                    descriptor.name,
                    field.name,
                    field.ty.element()
                )));
            }
        }

        Ok(())
    }

    pub fn record(&self, name: &str) -> Option<&'static RecordDescriptor> {
        self.records.get(name).copied()
    }

    pub fn enumeration(&self, name: &str) -> Option<&'static EnumDescriptor> {
        self.enums.get(name).copied()
    }

    pub fn records(&self) -> impl Iterator<Item = &'static RecordDescriptor> + '_ {
        self.records.values().copied()
    }

    pub fn enums(&self) -> impl Iterator<Item = &'static EnumDescriptor> + '_ {
        self.enums.values().copied()
    }

    pub fn contains_file(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    /// Constructs a record by type name from an initial mapping of field
    /// names to values.
    pub fn new_record<I, S>(&self, name: &str, values: I) -> Result<Box<dyn Record>>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let descriptor = self.record(name).ok_or_else(|| {
            Error::Registration(format!("record {} is not registered", name))
        })?;

        let mut record = descriptor.new_instance();
        record.set_all(values)?;
        Ok(record)
    }
}

static GLOBAL: OnceCell<Registry> = OnceCell::new();

/// Builds the process-wide registry. Should be called once at startup before
/// any lookups through [global].
pub fn init(files: &[&'static FileDescriptor]) -> Result<&'static Registry> {
    let mut registry = Registry::new();
    for file in files {
        registry.register_file(*file)?;
    }

    let registry = GLOBAL
        .try_insert(registry)
        .map_err(|_| Error::Registration("global registry is already initialized".into()))?;

    log::info!("initialized global registry with {} files", files.len());
    Ok(registry)
}

/// The registry installed with [init], if any.
pub fn global() -> Option<&'static Registry> {
    GLOBAL.get()
}
