//! Serializer builder for application start-up
//!
//! Collects configuration and message registrations, then produces a
//! populated, read-only [`ProtobufSerializer`].

use crate::Result;
use gframe_config::{SerializerConfig, ValidationMode};
use gframe_protobuf::{Descriptor, ProtoMessage, ProtobufSerializer};
use std::path::Path;
use std::sync::Arc;

/// Serializer builder
///
/// Registration order is preserved, so the first descriptor for an id wins
/// in lenient mode exactly as it would with direct `register` calls.
///
/// # Example
///
/// ```rust,ignore
/// use gframe::SerializerBuilder;
///
/// let serializer = SerializerBuilder::new()
///     .register_type::<ChatMsg>()
///     .register_type::<HeartBeat>()
///     .build_shared()?;
/// ```
pub struct SerializerBuilder {
    /// Serializer configuration
    config: SerializerConfig,
    /// Pending registrations
    descriptors: Vec<Descriptor>,
}

impl SerializerBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: SerializerConfig::default(),
            descriptors: Vec::new(),
        }
    }

    /// Create a builder from a TOML file, with environment overrides applied
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new().config(SerializerConfig::from_file_with_env(path)?))
    }

    /// Create a builder from defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        Ok(Self::new().config(SerializerConfig::default().load_with_env_override()?))
    }

    /// Set custom serializer configuration
    pub fn config(mut self, config: SerializerConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the validation mode
    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.config.validation_mode = mode;
        self
    }

    /// Queue a descriptor for registration
    pub fn register(mut self, descriptor: Descriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Queue a message type for registration under its own id
    pub fn register_type<M: ProtoMessage>(self) -> Self {
        let id = M::default().proto_id();
        self.register(Descriptor::of::<M>(id))
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Validate the configuration and populate the serializer
    pub fn build(self) -> Result<ProtobufSerializer> {
        self.config.validate()?;

        let mut serializer = ProtobufSerializer::with_config(&self.config);
        for descriptor in self.descriptors {
            serializer.register(descriptor)?;
        }

        Ok(serializer)
    }

    /// Build and wrap in an [`Arc`] for sharing across threads
    pub fn build_shared(self) -> Result<Arc<ProtobufSerializer>> {
        self.build().map(Arc::new)
    }
}

impl Default for SerializerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
