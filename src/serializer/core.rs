use chrono::{DateTime, Utc};
use serde_json::Value;

use super::list::ListSerializer;
use crate::error::SerializerError;
use crate::render::{self, Output, RenderOptions};

/// 核心序列化 trait
///
/// 一个序列化器包装一个领域对象（借用，不拷贝），负责把它转换成原始属性树：
/// 由 null、布尔、数字、字符串、数组和保持插入顺序的对象组成的 `Value`。
///
/// `data()` 对同一对象状态必须是纯函数，不能做 I/O。没有覆盖 `data()` 的
/// 实现会返回 `SerializerError::NotImplemented`。
///
/// # 示例
/// ```ignore
/// struct PersonSerializer<'a> {
///     person: &'a Person,
/// }
///
/// impl Serializer for PersonSerializer<'_> {
///     fn data(&self) -> Result<Value, SerializerError> {
///         Ok(json!({ "name": self.person.name, "age": self.person.age }))
///     }
/// }
/// ```
pub trait Serializer {
    /// 产出原始属性树
    fn data(&self) -> Result<Value, SerializerError> {
        Err(SerializerError::NotImplemented(self.name()))
    }

    /// 用于 ETag 的不透明版本标识
    fn cache_key(&self) -> Option<String> {
        None
    }

    /// 最后修改时间
    fn last_modified(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// 序列化器的类型名，不含模块路径
    fn name(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }

    /// 用注册的渲染器渲染 `data()`
    fn render(&self, format: &str, options: &RenderOptions) -> Result<Output, SerializerError> {
        let renderer = render::renderer(format)?;
        renderer.render(&self.data()?, options)
    }

    /// 该格式对应的 Content-Type
    fn mime_type(&self, format: &str) -> Result<String, SerializerError> {
        Ok(render::renderer(format)?.content_type().to_string())
    }
}

impl<S: Serializer + ?Sized> Serializer for Box<S> {
    fn data(&self) -> Result<Value, SerializerError> {
        (**self).data()
    }

    fn cache_key(&self) -> Option<String> {
        (**self).cache_key()
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        (**self).last_modified()
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn render(&self, format: &str, options: &RenderOptions) -> Result<Output, SerializerError> {
        (**self).render(format, options)
    }

    fn mime_type(&self, format: &str) -> Result<String, SerializerError> {
        (**self).mime_type(format)
    }
}

/// 带类型的构造约定：从对象引用（及额外参数）创建序列化器
///
/// `Args` 是被包装对象之外的构造参数，列表场景下会被复制给每个元素。
/// 没有额外参数时使用 `()`。
pub trait Wrap<'a>: Serializer + Sized + 'a {
    type Object: ?Sized + 'a;
    type Args: Clone;

    fn wrap(object: &'a Self::Object, args: Self::Args) -> Self;

    /// 创建包装一组对象的列表序列化器，元素类型为 `Self`
    fn list<I>(items: I, args: Self::Args) -> ListSerializer<'a>
    where
        I: IntoIterator<Item = &'a Self::Object>,
    {
        let items = items
            .into_iter()
            .map(|object| Box::new(Self::wrap(object, args.clone())) as Box<dyn Serializer + 'a>)
            .collect();
        ListSerializer::new(items, short_type_name(std::any::type_name::<Self>()))
    }
}

/// 去掉类型名中的模块路径，例如 `app::model::PersonSerializer<'_>` 得到 `PersonSerializer`
pub fn short_type_name(full_name: &str) -> String {
    let main_part = full_name.split('<').next().unwrap_or(full_name);
    main_part
        .rsplit("::")
        .next()
        .unwrap_or(main_part)
        .trim()
        .to_string()
}
