#![allow(dead_code)]

use glgen::{Config, Version};

/// Small but complete registry document: typedefs (including a khronos one
/// and an apientry placeholder), two GL enums plus a GLES-only enum, two
/// commands, and three features exercising version gates, API gates and a
/// core-profile removal.
pub const MINI_REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<registry>
    <comment>fixture registry</comment>
    <types>
        <type>typedef unsigned int <name>GLenum</name>;</type>
        <type>typedef unsigned char <name>GLubyte</name>;</type>
        <type name="khrplatform">#include &lt;KHR/khrplatform.h&gt;</type>
        <type>typedef khronos_float_t <name>GLclampf</name>;</type>
        <type>typedef void (<apientry/> *<name>GLDEBUGPROC</name>)(void);</type>
    </types>
    <enums namespace="GL">
        <enum value="0x1906" name="GL_ALPHA"/>
        <enum value="0x1907" name="GL_BETA"/>
        <enum value="0x1908" name="GL_GLES_ONLY" api="gles2"/>
    </enums>
    <commands namespace="GL">
        <command>
            <proto>void <name>glFrob</name></proto>
            <param><ptype>GLenum</ptype> <name>mode</name></param>
            <param>const void *<name>data</name></param>
        </command>
        <command>
            <proto>const <ptype>GLubyte</ptype> *<name>glGetThing</name></proto>
            <param><ptype>GLenum</ptype> <name>type</name></param>
        </command>
    </commands>
    <feature api="gl" name="GL_VERSION_1_0" number="1.0">
        <require>
            <enum name="GL_ALPHA"/>
            <command name="glFrob"/>
        </require>
    </feature>
    <feature api="gl" name="GL_VERSION_2_0" number="2.0">
        <require>
            <enum name="GL_BETA"/>
            <command name="glGetThing"/>
        </require>
        <remove profile="core">
            <enum name="GL_ALPHA"/>
        </remove>
    </feature>
    <feature api="gles2" name="GL_ES_VERSION_2_0" number="2.0">
        <require>
            <enum name="GL_GLES_ONLY"/>
        </require>
    </feature>
</registry>
"#;

pub fn config(api: &str, version: Version, profile: &str) -> Config {
    Config {
        api: api.to_string(),
        version,
        profile: profile.to_string(),
        core: false,
        tags: String::new(),
        package: "gl".to_string(),
    }
}

pub fn enum_names(registry: &glgen::Registry) -> Vec<&str> {
    registry.enums.iter().map(|e| e.name.as_str()).collect()
}

pub fn command_names(registry: &glgen::Registry) -> Vec<&str> {
    registry.commands.iter().map(|c| c.name.as_str()).collect()
}
